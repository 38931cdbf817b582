use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sil_core::PixelImage;
use sil_trace::{MooreTracer, TraceConfig};

fn synthetic_blob(width: usize, height: usize) -> PixelImage {
    let mut img = PixelImage::new_transparent(width, height);
    let cx = width as f32 * 0.5;
    let cy = height as f32 * 0.5;
    let r = width.min(height) as f32 * 0.4;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            // Wobbly radius so the walk sees concave stretches too.
            let wobble = 1.0 + 0.15 * (dy.atan2(dx) * 7.0).sin();
            if dx * dx + dy * dy <= (r * wobble) * (r * wobble) {
                *img.pixel_mut(x, y).expect("in bounds") = [255, 255, 255, 255];
            }
        }
    }
    img
}

fn bench_trace(c: &mut Criterion) {
    let img = synthetic_blob(1024, 1024);
    let buf = img.as_buffer();
    let tracer = MooreTracer::new(&TraceConfig::default());

    c.bench_function("moore_trace_blob_1024x1024", |b| {
        b.iter(|| {
            let contour = tracer.trace(black_box(&buf)).expect("blob traces");
            black_box(contour.len());
        });
    });
}

fn bench_seed_scan(c: &mut Criterion) {
    let mut img = PixelImage::new_transparent(1920, 1080);
    *img.pixel_mut(1900, 1070).expect("in bounds") = [0, 0, 0, 255];
    let buf = img.as_buffer();
    let tracer = MooreTracer::default();

    c.bench_function("seed_scan_worst_case_1920x1080", |b| {
        b.iter(|| black_box(tracer.find_seed(black_box(&buf))));
    });
}

criterion_group!(benches, bench_trace, bench_seed_scan);
criterion_main!(benches);
