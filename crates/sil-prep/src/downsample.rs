use sil_core::{CHANNELS, PixelBuffer, PixelImage};

/// Halves both dimensions; each output channel is the rounded mean of a 2x2
/// block. RGB is averaged straight (not premultiplied).
pub fn downsample2x2_mean_rgba(src: &PixelBuffer<'_>) -> PixelImage {
    let dst_w = src.width() / 2;
    let dst_h = src.height() / 2;
    let mut dst = PixelImage::new_transparent(dst_w, dst_h);
    if dst_w == 0 || dst_h == 0 {
        return dst;
    }

    let row_bytes = dst_w * CHANNELS;
    for (y, dst_row) in dst.data_mut().chunks_exact_mut(row_bytes).enumerate() {
        let src_row0 = src.row(2 * y);
        let src_row1 = src.row(2 * y + 1);
        for (x, out) in dst_row.chunks_exact_mut(CHANNELS).enumerate() {
            let s0 = 2 * x * CHANNELS;
            let s1 = s0 + CHANNELS;
            for (ch, o) in out.iter_mut().enumerate() {
                let sum = src_row0[s0 + ch] as u32
                    + src_row0[s1 + ch] as u32
                    + src_row1[s0 + ch] as u32
                    + src_row1[s1 + ch] as u32;
                *o = ((sum + 2) / 4) as u8;
            }
        }
    }

    dst
}

/// Applies [`downsample2x2_mean_rgba`] up to `levels` times, stopping before
/// a dimension would drop below 1. Returns the image and the levels applied.
pub fn downsample_levels(src: &PixelBuffer<'_>, levels: usize) -> (PixelImage, usize) {
    let mut current = PixelImage::from_buffer(src);
    let mut applied = 0;
    while applied < levels && current.width() >= 2 && current.height() >= 2 {
        current = downsample2x2_mean_rgba(&current.as_buffer());
        applied += 1;
    }
    (current, applied)
}
