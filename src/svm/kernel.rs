use serde::{Deserialize, Serialize};

/// Polynomial kernel `(gamma * <a, b> + coef0) ^ degree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialKernel {
    pub gamma: f64,
    pub coef0: f64,
    pub degree: u32,
}

impl PolynomialKernel {
    pub fn new(gamma: f64, coef0: f64, degree: u32) -> Self {
        PolynomialKernel {
            gamma,
            coef0,
            degree,
        }
    }

    /// Degree-3 kernel with unit offset, the fixed shape used by the trainer.
    pub fn cubic(gamma: f64) -> Self {
        Self::new(gamma, 1.0, 3)
    }

    #[inline]
    pub fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        let dot: f64 = a.iter().zip(b).map(|(x, z)| x * z).sum();
        (self.gamma * dot + self.coef0).powi(self.degree as i32)
    }
}

/// Data-scaled gamma, `1 / (n_features * variance)` over every feature value
/// in the training rows. Falls back to 1.0 for degenerate input.
pub fn gamma_scale<'a, I>(rows: I) -> f64
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut count = 0usize;
    let mut width = 0usize;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for row in rows {
        width = row.len();
        for &value in row {
            count += 1;
            sum += value;
            sum_sq += value * value;
        }
    }
    if count == 0 || width == 0 {
        return 1.0;
    }
    let mean = sum / count as f64;
    let variance = sum_sq / count as f64 - mean * mean;
    if variance <= 0.0 {
        return 1.0;
    }
    1.0 / (width as f64 * variance)
}
