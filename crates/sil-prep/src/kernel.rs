/// Normalized 1D Gaussian.
///
/// `radius = ceil(3 * sigma)`, minimum 1; `weights.len() == 2 * radius + 1`
/// and the weights sum to ~1.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl GaussianKernel1D {
    /// `None` unless `sigma` is finite and positive.
    pub fn new(sigma: f32) -> Option<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return None;
        }

        let radius = ((3.0 * sigma).ceil() as usize).max(1);
        let two_sigma2 = 2.0 * sigma * sigma;
        let mut weights: Vec<f32> = (0..2 * radius + 1)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-(x * x) / two_sigma2).exp()
            })
            .collect();

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Some(Self {
            sigma,
            radius,
            weights,
        })
    }
}
