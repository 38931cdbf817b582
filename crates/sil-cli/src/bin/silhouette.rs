use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{Rgb, RgbImage, RgbaImage};
use log::info;
use serde::{Deserialize, Serialize};
use sil_core::{BorderMode, PixelImage, Point2f};
use sil_prep::{PrepConfig, Prepared, preprocess};
use sil_trace::{DEFAULT_ALPHA_THRESHOLD, MooreTracer, TraceConfig};

#[derive(Parser, Debug)]
#[command(name = "silhouette")]
#[command(about = "Trace the outer boundary of an alpha silhouette")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preprocess, trace, and write contour.json, meta.json and overlay.png.
    #[command(name = "trace")]
    Trace(TraceArgs),
    /// Write the preprocessed image the tracer would see.
    #[command(name = "prep")]
    Prep(PrepArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// JSON run config; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
struct PipelineArgs {
    #[arg(long)]
    alpha_threshold: Option<u8>,
    #[arg(long)]
    downscale_levels: Option<usize>,
    #[arg(long)]
    blur_sigma: Option<f32>,
    #[arg(long, value_enum)]
    blur_border: Option<BlurBorder>,
    #[arg(long)]
    close_gaps: bool,
    #[arg(long)]
    pad: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    pipeline: PipelineArgs,
    /// Drop vertices in the middle of straight runs.
    #[arg(long)]
    simplify: bool,
}

#[derive(Args, Debug, Clone)]
struct PrepArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    pipeline: PipelineArgs,
}

/// What the alpha blur reads past the image edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BlurBorder {
    /// Outside is fully transparent; alpha fades out at the frame.
    #[default]
    Transparent,
    /// Repeat the edge pixel; shapes cropped by the frame stay solid.
    Clamp,
    /// Mirror around the edge pixel.
    Reflect,
}

impl BlurBorder {
    fn mode(self) -> BorderMode<f32> {
        match self {
            Self::Transparent => BorderMode::Constant(0.0),
            Self::Clamp => BorderMode::Clamp,
            Self::Reflect => BorderMode::Reflect101,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Transparent => "transparent",
            Self::Clamp => "clamp",
            Self::Reflect => "reflect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RunConfig {
    alpha_threshold: u8,
    downscale_levels: usize,
    blur_sigma: Option<f32>,
    blur_border: BlurBorder,
    close_gaps: bool,
    pad: usize,
    simplify: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        let prep = PrepConfig::default();
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            downscale_levels: prep.downscale_levels,
            blur_sigma: prep.blur_sigma,
            blur_border: BlurBorder::default(),
            close_gaps: prep.close_gaps,
            pad: prep.pad,
            simplify: false,
        }
    }
}

impl RunConfig {
    fn apply(&mut self, args: &PipelineArgs) {
        if let Some(t) = args.alpha_threshold {
            self.alpha_threshold = t;
        }
        if let Some(levels) = args.downscale_levels {
            self.downscale_levels = levels;
        }
        if args.blur_sigma.is_some() {
            self.blur_sigma = args.blur_sigma;
        }
        if let Some(border) = args.blur_border {
            self.blur_border = border;
        }
        if args.close_gaps {
            self.close_gaps = true;
        }
        if let Some(pad) = args.pad {
            self.pad = pad;
        }
    }

    fn prep_config(&self) -> PrepConfig {
        PrepConfig {
            downscale_levels: self.downscale_levels,
            blur_sigma: self.blur_sigma,
            blur_border: self.blur_border.mode(),
            close_gaps: self.close_gaps,
            pad: self.pad,
            alpha_threshold: self.alpha_threshold,
        }
    }

    fn trace_config(&self) -> TraceConfig {
        TraceConfig {
            alpha_threshold: self.alpha_threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ContourDto {
    source_width: usize,
    source_height: usize,
    closed: bool,
    /// Traced pixels in the preprocessed image.
    pixels: Vec<[usize; 2]>,
    /// The same vertices mapped back to source pixel coordinates.
    points: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct PrepMetaDto {
    input: String,
    source_size: [usize; 2],
    prepared_size: [usize; 2],
    requested_levels: usize,
    applied_levels: usize,
    scale: usize,
    pad: usize,
    blur_sigma: Option<f32>,
    blur_border: &'static str,
    close_gaps: bool,
    policy: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct TraceMetaDto {
    #[serde(flatten)]
    prep: PrepMetaDto,
    alpha_threshold: u8,
    connectivity: &'static str,
    stopping: &'static str,
    seed: [usize; 2],
    traced_points: usize,
    emitted_points: usize,
    simplified: bool,
    probes: usize,
    perimeter_px: f32,
    bbox_min: [f32; 2],
    bbox_max: [f32; 2],
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Trace(args) => run_trace(args),
        Command::Prep(args) => run_prep(args),
    }
}

fn run_trace(args: TraceArgs) -> Result<()> {
    let mut cfg = load_run_config(&args.common, &args.pipeline)?;
    cfg.simplify |= args.simplify;

    let source = load_input_rgba(&args.common.input)?;
    let prepared = preprocess(&source.as_buffer(), &cfg.prep_config())
        .context("preprocessing input")?;

    let tracer = MooreTracer::new(&cfg.trace_config());
    let traced = tracer
        .trace(&prepared.buffer())
        .with_context(|| format!("tracing {}", args.common.input.display()))?;
    let contour = if cfg.simplify {
        traced.without_collinear()
    } else {
        traced.clone()
    };

    let polyline = contour.to_polyline(|c| prepared.to_source(c));
    let out_dir = ensure_out_dir(&args.common.out)?;

    write_json(
        out_dir.join("contour.json"),
        &ContourDto {
            source_width: source.width(),
            source_height: source.height(),
            closed: contour.is_closed(),
            pixels: contour.points().iter().map(|c| [c.x, c.y]).collect(),
            points: polyline.points.iter().map(|p| [p.x, p.y]).collect(),
        },
    )?;

    let (bbox_min, bbox_max) = contour.bounding_box();
    let (bbox_min, bbox_max) = (prepared.to_source(bbox_min), prepared.to_source(bbox_max));
    let seed = traced.first();
    write_json(
        out_dir.join("meta.json"),
        &TraceMetaDto {
            prep: prep_meta(&args.common.input, &source, &prepared, &cfg),
            alpha_threshold: cfg.alpha_threshold,
            connectivity: "C8 (Moore neighborhood, clockwise)",
            stopping: "Jacob's criterion",
            seed: [seed.x, seed.y],
            traced_points: traced.len(),
            emitted_points: contour.len(),
            simplified: cfg.simplify,
            probes: traced.probes(),
            perimeter_px: polyline.length(),
            bbox_min: [bbox_min.x, bbox_min.y],
            bbox_max: [bbox_max.x, bbox_max.y],
        },
    )?;

    let overlay = render_overlay(&source, &polyline.points);
    let overlay_path = out_dir.join("overlay.png");
    overlay
        .save(&overlay_path)
        .with_context(|| format!("saving image {}", overlay_path.display()))?;

    info!(
        "{} points ({} traced) written to {}",
        contour.len(),
        traced.len(),
        out_dir.display()
    );
    Ok(())
}

fn run_prep(args: PrepArgs) -> Result<()> {
    let cfg = load_run_config(&args.common, &args.pipeline)?;
    let source = load_input_rgba(&args.common.input)?;
    let prepared = preprocess(&source.as_buffer(), &cfg.prep_config())
        .context("preprocessing input")?;

    let out_dir = ensure_out_dir(&args.common.out)?;
    save_rgba(out_dir.join("prepared.png"), &prepared.image)?;
    write_json(
        out_dir.join("meta.json"),
        &prep_meta(&args.common.input, &source, &prepared, &cfg),
    )?;

    info!(
        "prepared {}x{} image written to {}",
        prepared.image.width(),
        prepared.image.height(),
        out_dir.display()
    );
    Ok(())
}

fn load_run_config(common: &CommonArgs, pipeline: &PipelineArgs) -> Result<RunConfig> {
    let mut cfg = match &common.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json(path).with_context(|| format!("reading run config {}", path.display()))?
        }
        None => RunConfig::default(),
    };
    cfg.apply(pipeline);
    Ok(cfg)
}

fn prep_meta(
    input: &Path,
    source: &PixelImage,
    prepared: &Prepared,
    cfg: &RunConfig,
) -> PrepMetaDto {
    PrepMetaDto {
        input: input.display().to_string(),
        source_size: [source.width(), source.height()],
        prepared_size: [prepared.image.width(), prepared.image.height()],
        requested_levels: cfg.downscale_levels,
        applied_levels: prepared.levels_applied,
        scale: prepared.scale,
        pad: prepared.pad,
        blur_sigma: cfg.blur_sigma,
        blur_border: cfg.blur_border.name(),
        close_gaps: cfg.close_gaps,
        policy: "2x2 mean downsample with drop-odd dimensions",
    }
}

fn load_input_rgba(path: &Path) -> Result<PixelImage> {
    ensure_file_exists(path, "input")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba.into_raw();

    PixelImage::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing pixel image from {}", path.display()))
}

fn save_rgba(path: PathBuf, img: &PixelImage) -> Result<()> {
    let rgba = RgbaImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .context("constructing RgbaImage from raw bytes")?;
    rgba.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// Composites `src` over a checkerboard and marks every contour vertex.
fn render_overlay(src: &PixelImage, points: &[Point2f]) -> RgbImage {
    let mut rgb = RgbImage::new(src.width() as u32, src.height() as u32);
    for (i, px) in src.data().chunks_exact(4).enumerate() {
        let (x, y) = (i % src.width(), i / src.width());
        let bg: u32 = if (x / 8 + y / 8).is_multiple_of(2) { 235 } else { 200 };
        let a = u32::from(px[3]);
        let blend = |c: u8| ((u32::from(c) * a + bg * (255 - a) + 127) / 255) as u8;
        rgb.put_pixel(x as u32, y as u32, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }

    for p in points {
        draw_dot(&mut rgb, p.x, p.y, Rgb([255, 64, 64]));
    }
    rgb
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i64;
    let yi = y.round() as i64;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let (nx, ny) = (xi + dx, yi + dy);
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}

fn ensure_out_dir(out: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    Ok(out.to_path_buf())
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
