use sil_core::{BorderMode, PixelImage};

use crate::conv::convolve_f32;
use crate::kernel::GaussianKernel1D;

/// Separable Gaussian blur of the alpha channel, rows then columns.
///
/// `border` decides what lies past the image edge. `Constant(0.0)` treats it as
/// transparent, so alpha fades out at the frame. `Clamp` or `Reflect101` keep
/// a shape that was cropped by the frame solid up to the edge.
pub fn blur_alpha(img: &mut PixelImage, kernel: &GaussianKernel1D, border: BorderMode<f32>) {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return;
    }

    let mut plane: Vec<f32> = img.alpha_plane().into_iter().map(f32::from).collect();

    let mut row_out = vec![0.0f32; w];
    for row in plane.chunks_exact_mut(w) {
        convolve_f32(row, &kernel.weights, kernel.radius, border, &mut row_out);
        row.copy_from_slice(&row_out);
    }

    let mut col = vec![0.0f32; h];
    let mut col_out = vec![0.0f32; h];
    for x in 0..w {
        for (y, v) in col.iter_mut().enumerate() {
            *v = plane[y * w + x];
        }
        convolve_f32(&col, &kernel.weights, kernel.radius, border, &mut col_out);
        for (y, &v) in col_out.iter().enumerate() {
            plane[y * w + x] = v;
        }
    }

    let alpha: Vec<u8> = plane
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    img.set_alpha_plane(&alpha);
}

#[cfg(test)]
mod tests {
    use sil_core::{BorderMode, PixelImage};

    use super::blur_alpha;
    use crate::kernel::GaussianKernel1D;

    #[test]
    fn blur_spreads_alpha_and_keeps_rgb() {
        let mut img = PixelImage::new_transparent(9, 9);
        *img.pixel_mut(4, 4).expect("in bounds") = [10, 20, 30, 255];

        let kernel = GaussianKernel1D::new(1.0).expect("valid sigma");
        blur_alpha(&mut img, &kernel, BorderMode::Constant(0.0));

        let center = img.pixel(4, 4).expect("in bounds");
        assert_eq!(&center[..3], &[10, 20, 30]);
        assert!(center[3] < 255);

        let near = img.pixel(5, 4).expect("in bounds")[3];
        let far = img.pixel(7, 4).expect("in bounds")[3];
        assert!(near > 0);
        assert!(near < center[3]);
        assert!(far < near);

        // Symmetric footprint.
        assert_eq!(img.pixel(3, 4), Some([0, 0, 0, near]));
        assert_eq!(img.pixel(4, 5).map(|p| p[3]), Some(near));
    }

    #[test]
    fn opaque_interior_stays_opaque_and_edges_fade() {
        let mut img = PixelImage::new_transparent(12, 12);
        for px in img.data_mut().chunks_exact_mut(4) {
            px[3] = 255;
        }

        let kernel = GaussianKernel1D::new(0.8).expect("valid sigma");
        blur_alpha(&mut img, &kernel, BorderMode::Constant(0.0));

        assert_eq!(img.pixel(6, 6).map(|p| p[3]), Some(255));
        let corner = img.pixel(0, 0).expect("in bounds")[3];
        assert!(corner < 255);
    }

    #[test]
    fn edge_replicating_borders_keep_cropped_shapes_solid() {
        let opaque = || {
            let mut img = PixelImage::new_transparent(6, 6);
            for px in img.data_mut().chunks_exact_mut(4) {
                px[3] = 255;
            }
            img
        };
        let kernel = GaussianKernel1D::new(1.0).expect("valid sigma");

        for border in [BorderMode::Clamp, BorderMode::Reflect101] {
            let mut img = opaque();
            blur_alpha(&mut img, &kernel, border);
            assert!(img.alpha_plane().iter().all(|&a| a == 255), "{border:?}");
        }

        let mut faded = opaque();
        blur_alpha(&mut faded, &kernel, BorderMode::Constant(0.0));
        assert!(faded.pixel(0, 0).is_some_and(|p| p[3] < 200));
    }
}
