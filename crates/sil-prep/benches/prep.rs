use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sil_core::{BorderMode, PixelImage};
use sil_prep::{GaussianKernel1D, PrepConfig, blur_alpha, downsample2x2_mean_rgba, preprocess};

fn checker_disc(size: usize) -> PixelImage {
    let mut img = PixelImage::new_transparent(size, size);
    let c = size as f32 * 0.5;
    let r2 = (size as f32 * 0.45).powi(2);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - c;
            let dy = y as f32 - c;
            if dx * dx + dy * dy <= r2 {
                let a = if (x / 8 + y / 8) % 2 == 0 { 255 } else { 180 };
                *img.pixel_mut(x, y).expect("in bounds") = [40, 80, 120, a];
            }
        }
    }
    img
}

fn bench_downsample(c: &mut Criterion) {
    let img = checker_disc(2048);
    let buf = img.as_buffer();

    c.bench_function("downsample2x2_mean_rgba_2048", |b| {
        b.iter(|| black_box(downsample2x2_mean_rgba(black_box(&buf))));
    });
}

fn bench_blur(c: &mut Criterion) {
    let img = checker_disc(512);
    let kernel = GaussianKernel1D::new(1.5).expect("valid sigma");

    c.bench_function("blur_alpha_sigma1.5_512", |b| {
        b.iter(|| {
            let mut work = img.clone();
            blur_alpha(&mut work, black_box(&kernel), BorderMode::Constant(0.0));
            black_box(work);
        });
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let img = checker_disc(2048);
    let buf = img.as_buffer();
    let cfg = PrepConfig {
        downscale_levels: 2,
        blur_sigma: Some(1.0),
        close_gaps: true,
        ..PrepConfig::default()
    };

    c.bench_function("preprocess_full_2048", |b| {
        b.iter(|| black_box(preprocess(black_box(&buf), &cfg).expect("valid config")));
    });
}

criterion_group!(benches, bench_downsample, bench_blur, bench_preprocess);
criterion_main!(benches);
