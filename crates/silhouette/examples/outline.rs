//! Example: trace the silhouette of every sprite in a directory.
//!
//! Each PNG is decoded to RGBA, optionally downscaled, and traced. Outlines
//! (in source pixel coordinates) are collected into one JSON file, and
//! per-sprite timing is printed to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p silhouette --example outline -- --help
//!   cargo run -p silhouette --example outline -- --dir data/sprites

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use silhouette::{MooreTracer, PixelImage, PrepConfig, TraceConfig, TraceError, preprocess};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Trace outlines for every PNG in a directory")]
struct Args {
    /// Directory scanned (non-recursively) for `.png` files
    #[arg(long, default_value = "data/sprites")]
    dir: PathBuf,

    /// Alpha values strictly above this count as the shape
    #[arg(long, default_value_t = 8)]
    alpha_threshold: u8,

    /// Number of 2x2 mean halvings before tracing
    #[arg(long, default_value_t = 0)]
    downscale_levels: usize,

    /// Drop vertices in the middle of straight runs
    #[arg(long)]
    simplify: bool,

    /// Output JSON path (default: <dir>/outlines.json)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OutlineDto {
    file: String,
    width: usize,
    height: usize,
    /// Wall-clock time for preprocessing plus tracing, in milliseconds.
    elapsed_ms: f64,
    /// `None` when the sprite is fully transparent.
    points: Option<Vec<[f32; 2]>>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn png_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry.context("reading directory entry")?.path();
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("png")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_rgba(path: &Path) -> Result<PixelImage> {
    let rgba = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .into_rgba8();
    let (w, h) = rgba.dimensions();
    PixelImage::from_vec(w as usize, h as usize, rgba.into_raw())
        .with_context(|| format!("building PixelImage for {}", path.display()))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.dir.join("outlines.json"));

    let prep_cfg = PrepConfig {
        downscale_levels: args.downscale_levels,
        alpha_threshold: args.alpha_threshold,
        ..PrepConfig::default()
    };
    let tracer = MooreTracer::new(&TraceConfig {
        alpha_threshold: args.alpha_threshold,
    });

    let files = png_files(&args.dir)?;
    println!("found {} sprites in {}", files.len(), args.dir.display());

    let mut results = Vec::with_capacity(files.len());
    let total_start = Instant::now();

    for path in &files {
        let img = load_rgba(path)?;

        let t0 = Instant::now();
        let prepared = preprocess(&img.as_buffer(), &prep_cfg).context("preprocessing")?;
        let points = match tracer.trace(&prepared.buffer()) {
            Ok(contour) => {
                let contour = if args.simplify {
                    contour.without_collinear()
                } else {
                    contour
                };
                let line = contour.to_polyline(|c| prepared.to_source(c));
                Some(line.points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>())
            }
            Err(TraceError::NoBorderFound) => None,
            Err(e) => return Err(e).with_context(|| format!("tracing {}", path.display())),
        };
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

        let n = points.as_ref().map_or(0, Vec::len);
        println!("  {}: {n} points  ({elapsed_ms:.2} ms)", path.display());

        results.push(OutlineDto {
            file: path.display().to_string(),
            width: img.width(),
            height: img.height(),
            elapsed_ms,
            points,
        });
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1e3;
    println!("total tracing time: {total_ms:.2} ms");

    let out_file = std::fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    serde_json::to_writer_pretty(out_file, &results)
        .with_context(|| format!("writing JSON to {}", out_path.display()))?;

    println!("results written to {}", out_path.display());
    Ok(())
}
