use crate::dataset::LabeledSample;
use crate::svm::kernel::{self, PolynomialKernel};
use crate::svm::smo::{self, BinarySvm, SmoParams};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::io::{Error, ErrorKind};

/// One machine of the one-vs-one decomposition. A positive decision value
/// votes for `positive_class`, anything else for `negative_class`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseSvm {
    pub positive_class: usize,
    pub negative_class: usize,
    pub svm: BinarySvm,
}

/// A fitted multi-class SVM: the shared kernel plus one pairwise machine per
/// unordered class pair. This is the unit the artifact layer serializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiClassSvm {
    pub kernel: PolynomialKernel,
    pub num_classes: usize,
    pub machines: Vec<PairwiseSvm>,
}

impl MultiClassSvm {
    /// Fits one-vs-one machines over `samples`. The kernel gamma is scaled to
    /// the data; a fixed `seed` makes the whole fit reproducible.
    pub fn fit(
        samples: &[LabeledSample],
        num_classes: usize,
        params: &SmoParams,
        seed: u64,
    ) -> Result<Self, Error> {
        if num_classes < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "num_classes must be >= 2",
            ));
        }
        if samples.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "no training samples"));
        }
        let mut counts = vec![0usize; num_classes];
        for sample in samples {
            if sample.class >= num_classes {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("class label {} out of range", sample.class),
                ));
            }
            counts[sample.class] += 1;
        }
        if let Some(missing) = counts.iter().position(|&c| c == 0) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("class {missing} has no training samples"),
            ));
        }

        let gamma = kernel::gamma_scale(samples.iter().map(|s| s.features.as_slice()));
        let kernel = PolynomialKernel::cubic(gamma);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut machines = Vec::with_capacity(num_classes * (num_classes - 1) / 2);
        for positive in 0..num_classes {
            for negative in positive + 1..num_classes {
                let mut pair_features = Vec::new();
                let mut pair_labels = Vec::new();
                for sample in samples {
                    if sample.class == positive {
                        pair_features.push(sample.features.clone());
                        pair_labels.push(1.0);
                    } else if sample.class == negative {
                        pair_features.push(sample.features.clone());
                        pair_labels.push(-1.0);
                    }
                }
                let svm = smo::train_binary(&pair_features, &pair_labels, &kernel, params, &mut rng);
                log::debug!(
                    "pair ({positive}, {negative}): {} support vectors",
                    svm.support_vectors.len()
                );
                machines.push(PairwiseSvm {
                    positive_class: positive,
                    negative_class: negative,
                    svm,
                });
            }
        }

        Ok(MultiClassSvm {
            kernel,
            num_classes,
            machines,
        })
    }

    /// Majority vote over the pairwise machines; ties go to the lowest class
    /// index.
    pub fn predict(&self, features: &[f64]) -> usize {
        let mut votes = vec![0usize; self.num_classes];
        for machine in &self.machines {
            let winner = if machine.svm.decision_value(&self.kernel, features) > 0.0 {
                machine.positive_class
            } else {
                machine.negative_class
            };
            votes[winner] += 1;
        }

        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        best
    }

    pub fn support_vector_count(&self) -> usize {
        self.machines
            .iter()
            .map(|m| m.svm.support_vectors.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{NUM_CLASSES, load_iris};

    const SEED: u64 = 42;

    fn fitted() -> MultiClassSvm {
        let samples = load_iris().unwrap();
        MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), SEED).unwrap()
    }

    #[test]
    fn reference_setosa_sample_predicts_class_zero() {
        assert_eq!(fitted().predict(&[5.1, 3.5, 1.4, 0.2]), 0);
    }

    #[test]
    fn reference_virginica_sample_predicts_class_two() {
        assert_eq!(fitted().predict(&[6.7, 3.0, 5.2, 2.3]), 2);
    }

    #[test]
    fn training_set_accuracy_is_high() {
        let samples = load_iris().unwrap();
        let model = MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), SEED).unwrap();

        let correct = samples
            .iter()
            .filter(|s| model.predict(&s.features) == s.class)
            .count();
        assert!(
            correct >= 143,
            "only {correct}/150 training samples classified correctly"
        );
    }

    #[test]
    fn fit_is_deterministic_for_a_fixed_seed() {
        let samples = load_iris().unwrap();
        let a = MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), SEED).unwrap();
        let b = MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), SEED).unwrap();

        for sample in &samples {
            assert_eq!(a.predict(&sample.features), b.predict(&sample.features));
        }
    }

    #[test]
    fn builds_one_machine_per_class_pair() {
        let model = fitted();
        assert_eq!(model.machines.len(), 3);
        assert!(model.support_vector_count() > 0);
    }

    #[test]
    fn fit_rejects_degenerate_input() {
        let samples = load_iris().unwrap();
        assert!(MultiClassSvm::fit(&samples, 1, &SmoParams::default(), SEED).is_err());
        assert!(MultiClassSvm::fit(&[], NUM_CLASSES, &SmoParams::default(), SEED).is_err());

        // a label outside num_classes is rejected up front
        assert!(MultiClassSvm::fit(&samples, 2, &SmoParams::default(), SEED).is_err());
    }

    #[test]
    fn fit_rejects_a_class_with_no_samples() {
        let samples: Vec<_> = load_iris()
            .unwrap()
            .into_iter()
            .filter(|s| s.class != 1)
            .collect();
        assert!(MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), SEED).is_err());
    }
}
