//! 3x3 binary morphology on alpha masks.
//!
//! Masks are packed `width * height` row-major `bool` planes. Outside the
//! mask counts as unset for both operations.

use sil_core::PixelImage;

pub fn erode3x3(mask: &[bool], width: usize, height: usize) -> Vec<bool> {
    assert_eq!(mask.len(), width * height, "mask must be width * height");
    let mut out = vec![false; mask.len()];

    for y in 0..height {
        for x in 0..width {
            out[y * width + x] = window(x, y, width, height)
                .map(|nb| nb.is_some_and(|i| mask[i]))
                .all(|set| set);
        }
    }
    out
}

pub fn dilate3x3(mask: &[bool], width: usize, height: usize) -> Vec<bool> {
    assert_eq!(mask.len(), width * height, "mask must be width * height");
    let mut out = vec![false; mask.len()];

    for y in 0..height {
        for x in 0..width {
            out[y * width + x] =
                window(x, y, width, height).any(|nb| nb.is_some_and(|i| mask[i]));
        }
    }
    out
}

pub fn close3x3(mask: &[bool], width: usize, height: usize) -> Vec<bool> {
    let dilated = dilate3x3(mask, width, height);
    erode3x3(&dilated, width, height)
}

/// Fills pixels that a 3x3 closing of the `alpha > threshold` mask adds,
/// setting their alpha to 255. Returns how many pixels were filled.
///
/// Pixels are only ever switched on; existing alpha is never lowered.
pub fn close_alpha_gaps(img: &mut PixelImage, threshold: u8) -> usize {
    let (w, h) = (img.width(), img.height());
    let mut alpha = img.alpha_plane();
    let mask: Vec<bool> = alpha.iter().map(|&a| a > threshold).collect();
    let closed = close3x3(&mask, w, h);

    let mut filled = 0;
    for ((a, &was), &now) in alpha.iter_mut().zip(&mask).zip(&closed) {
        if now && !was {
            *a = 255;
            filled += 1;
        }
    }

    if filled > 0 {
        img.set_alpha_plane(&alpha);
    }
    filled
}

/// Indices of the 3x3 window around `(x, y)`; `None` for cells outside.
fn window(x: usize, y: usize, width: usize, height: usize) -> impl Iterator<Item = Option<usize>> {
    (-1isize..=1).flat_map(move |dy| {
        (-1isize..=1).map(move |dx| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < width && ny < height).then(|| ny * width + nx)
        })
    })
}
