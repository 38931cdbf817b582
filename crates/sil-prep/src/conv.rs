use sil_core::BorderMode;

/// `out[i] = sum_k signal[i + radius - k] * kernel[k]`, with out-of-range
/// reads resolved by `border`.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let interior = radius..n.saturating_sub(radius);
    for (i, out_i) in out.iter_mut().enumerate() {
        *out_i = if interior.contains(&i) {
            let window = &signal[i - radius..=i + radius];
            window
                .iter()
                .zip(kernel.iter().rev())
                .map(|(s, k)| s * k)
                .sum()
        } else {
            kernel
                .iter()
                .enumerate()
                .map(|(k, &kv)| {
                    let idx = i as isize + radius as isize - k as isize;
                    border.read(signal, idx).unwrap_or(0.0) * kv
                })
                .sum()
        };
    }
}
