use crate::svm::kernel::PolynomialKernel;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Alphas below this are treated as zero when collecting support vectors.
const SUPPORT_THRESHOLD: f64 = 1e-12;

/// Minimum alpha step for an update to count as progress.
const MIN_ALPHA_STEP: f64 = 1e-5;

#[derive(Debug, Clone, Copy)]
pub struct SmoParams {
    /// Regularization constant (upper bound on every alpha).
    pub c: f64,
    /// KKT violation tolerance.
    pub tolerance: f64,
    /// Consecutive unchanged passes over the data before training stops.
    pub max_passes: u32,
    /// Hard cap on examined candidates, guarding against slow convergence.
    pub max_iterations: u32,
}

impl Default for SmoParams {
    fn default() -> Self {
        SmoParams {
            c: 1.0,
            tolerance: 1e-3,
            max_passes: 10,
            max_iterations: 20_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportVector {
    pub features: Vec<f64>,
    /// `y_i * alpha_i` folded into one signed weight.
    pub coefficient: f64,
}

/// A trained two-class machine: its support vectors and bias term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySvm {
    pub support_vectors: Vec<SupportVector>,
    pub bias: f64,
}

impl BinarySvm {
    /// Signed distance of `features` from the separating surface; positive
    /// means the +1 class.
    pub fn decision_value(&self, kernel: &PolynomialKernel, features: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .map(|sv| sv.coefficient * kernel.compute(&sv.features, features))
            .sum::<f64>()
            + self.bias
    }
}

/// Trains a two-class SVM with simplified SMO (Platt's working-set selection
/// reduced to one random partner index).
///
/// `labels` must hold +1.0 / -1.0 and `features` at least two rows; both
/// sides of the split are the caller's responsibility.
pub fn train_binary<R: Rng>(
    features: &[Vec<f64>],
    labels: &[f64],
    kernel: &PolynomialKernel,
    params: &SmoParams,
    rng: &mut R,
) -> BinarySvm {
    let n = features.len();
    debug_assert_eq!(n, labels.len());
    debug_assert!(n >= 2);

    let gram: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| kernel.compute(&features[i], &features[j]))
                .collect()
        })
        .collect();

    let mut alpha = vec![0.0f64; n];
    let mut bias = 0.0f64;

    let margin = |alpha: &[f64], bias: f64, i: usize| -> f64 {
        let mut sum = bias;
        for k in 0..n {
            if alpha[k] != 0.0 {
                sum += alpha[k] * labels[k] * gram[k][i];
            }
        }
        sum
    };

    let mut stable_passes = 0u32;
    let mut iterations = 0u32;
    while stable_passes < params.max_passes && iterations < params.max_iterations {
        let mut changed = 0usize;
        for i in 0..n {
            iterations += 1;
            let error_i = margin(&alpha, bias, i) - labels[i];
            let violation = labels[i] * error_i;
            let violates_kkt = (violation < -params.tolerance && alpha[i] < params.c)
                || (violation > params.tolerance && alpha[i] > 0.0);
            if !violates_kkt {
                continue;
            }

            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            let error_j = margin(&alpha, bias, j) - labels[j];
            let alpha_i_old = alpha[i];
            let alpha_j_old = alpha[j];

            let (low, high) = if labels[i] != labels[j] {
                (
                    (alpha_j_old - alpha_i_old).max(0.0),
                    (params.c + alpha_j_old - alpha_i_old).min(params.c),
                )
            } else {
                (
                    (alpha_i_old + alpha_j_old - params.c).max(0.0),
                    (alpha_i_old + alpha_j_old).min(params.c),
                )
            };
            if low >= high {
                continue;
            }

            let eta = 2.0 * gram[i][j] - gram[i][i] - gram[j][j];
            if eta >= 0.0 {
                continue;
            }

            let alpha_j_new =
                (alpha_j_old - labels[j] * (error_i - error_j) / eta).clamp(low, high);
            if (alpha_j_new - alpha_j_old).abs() < MIN_ALPHA_STEP {
                continue;
            }
            let alpha_i_new = alpha_i_old + labels[i] * labels[j] * (alpha_j_old - alpha_j_new);
            alpha[i] = alpha_i_new;
            alpha[j] = alpha_j_new;

            let b1 = bias
                - error_i
                - labels[i] * (alpha_i_new - alpha_i_old) * gram[i][i]
                - labels[j] * (alpha_j_new - alpha_j_old) * gram[i][j];
            let b2 = bias
                - error_j
                - labels[i] * (alpha_i_new - alpha_i_old) * gram[i][j]
                - labels[j] * (alpha_j_new - alpha_j_old) * gram[j][j];
            bias = if alpha_i_new > 0.0 && alpha_i_new < params.c {
                b1
            } else if alpha_j_new > 0.0 && alpha_j_new < params.c {
                b2
            } else {
                0.5 * (b1 + b2)
            };
            changed += 1;
        }
        stable_passes = if changed == 0 { stable_passes + 1 } else { 0 };
    }

    let support_vectors = (0..n)
        .filter(|&i| alpha[i] > SUPPORT_THRESHOLD)
        .map(|i| SupportVector {
            features: features[i].clone(),
            coefficient: labels[i] * alpha[i],
        })
        .collect();

    BinarySvm {
        support_vectors,
        bias,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn separable_set() -> (Vec<Vec<f64>>, Vec<f64>) {
        // two clusters around (0, 0) and (4, 4)
        let features = vec![
            vec![0.0, 0.1],
            vec![0.2, 0.0],
            vec![0.1, 0.3],
            vec![-0.2, 0.1],
            vec![4.0, 4.1],
            vec![3.8, 4.0],
            vec![4.2, 3.9],
            vec![4.1, 4.3],
        ];
        let labels = vec![-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0];
        (features, labels)
    }

    #[test]
    fn separates_two_clusters() {
        let (features, labels) = separable_set();
        let kernel = PolynomialKernel::cubic(0.25);
        let mut rng = StdRng::seed_from_u64(7);
        let svm = train_binary(&features, &labels, &kernel, &SmoParams::default(), &mut rng);

        for (row, &label) in features.iter().zip(&labels) {
            let value = svm.decision_value(&kernel, row);
            assert_eq!(value > 0.0, label > 0.0, "misclassified {row:?}");
        }
    }

    #[test]
    fn coefficients_stay_bounded_by_c() {
        let (features, labels) = separable_set();
        let kernel = PolynomialKernel::cubic(0.25);
        let params = SmoParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        let svm = train_binary(&features, &labels, &kernel, &params, &mut rng);

        assert!(!svm.support_vectors.is_empty());
        for sv in &svm.support_vectors {
            assert!(sv.coefficient.abs() <= params.c + 1e-9);
        }
    }

    #[test]
    fn one_sided_labels_produce_an_empty_machine() {
        let features = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let labels = vec![1.0, 1.0, 1.0];
        let kernel = PolynomialKernel::cubic(0.25);
        let mut rng = StdRng::seed_from_u64(7);
        let svm = train_binary(&features, &labels, &kernel, &SmoParams::default(), &mut rng);

        // no valid pair exists, so nothing can move off zero
        assert!(svm.support_vectors.is_empty());
        assert_eq!(svm.bias, 0.0);
    }

    #[test]
    fn same_seed_reproduces_the_same_machine() {
        let (features, labels) = separable_set();
        let kernel = PolynomialKernel::cubic(0.25);
        let params = SmoParams::default();

        let mut rng_a = StdRng::seed_from_u64(42);
        let a = train_binary(&features, &labels, &kernel, &params, &mut rng_a);
        let mut rng_b = StdRng::seed_from_u64(42);
        let b = train_binary(&features, &labels, &kernel, &params, &mut rng_b);

        assert_eq!(a.bias, b.bias);
        assert_eq!(a.support_vectors.len(), b.support_vectors.len());
        for (x, y) in a.support_vectors.iter().zip(&b.support_vectors) {
            assert_eq!(x.coefficient, y.coefficient);
            assert_eq!(x.features, y.features);
        }
    }
}
