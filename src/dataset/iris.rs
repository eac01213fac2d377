use strum_macros::{Display, FromRepr};
use thiserror::Error;

/// Fisher's iris reference dataset, bundled with the crate: 150 labeled
/// samples, 4 numeric features, 3 balanced classes.
static IRIS_CSV: &str = include_str!("iris.csv");

pub const NUM_FEATURES: usize = 4;
pub const NUM_CLASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[strum(serialize_all = "lowercase")]
pub enum IrisClass {
    Setosa = 0,
    Versicolor = 1,
    Virginica = 2,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("line {line}: expected {expected} comma-separated fields, found {found}")]
    WrongArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid numeric value `{value}`")]
    InvalidValue { line: usize, value: String },

    #[error("line {line}: class label `{value}` is outside the valid range")]
    InvalidLabel { line: usize, value: String },
}

#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub features: Vec<f64>,
    pub class: usize,
}

/// Parses the bundled CSV into labeled samples. The data is fixed at compile
/// time, so an error here means the bundled file itself is malformed.
pub fn load_iris() -> Result<Vec<LabeledSample>, DatasetError> {
    parse(IRIS_CSV)
}

fn parse(text: &str) -> Result<Vec<LabeledSample>, DatasetError> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        // first line is the header
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != NUM_FEATURES + 1 {
            return Err(DatasetError::WrongArity {
                line: line_number,
                expected: NUM_FEATURES + 1,
                found: fields.len(),
            });
        }

        let mut features = Vec::with_capacity(NUM_FEATURES);
        for field in &fields[..NUM_FEATURES] {
            let value = field.parse::<f64>().map_err(|_| DatasetError::InvalidValue {
                line: line_number,
                value: field.to_string(),
            })?;
            features.push(value);
        }

        let label_field = fields[NUM_FEATURES];
        let class = label_field
            .parse::<usize>()
            .ok()
            .filter(|&c| c < NUM_CLASSES)
            .ok_or_else(|| DatasetError::InvalidLabel {
                line: line_number,
                value: label_field.to_string(),
            })?;

        samples.push(LabeledSample { features, class });
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_has_expected_shape() {
        let samples = load_iris().unwrap();
        assert_eq!(samples.len(), 150);

        let mut counts = [0usize; NUM_CLASSES];
        for sample in &samples {
            assert_eq!(sample.features.len(), NUM_FEATURES);
            counts[sample.class] += 1;
        }
        assert_eq!(counts, [50, 50, 50]);
    }

    #[test]
    fn first_sample_is_the_reference_setosa() {
        let samples = load_iris().unwrap();
        assert_eq!(samples[0].features, vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(samples[0].class, 0);
    }

    #[test]
    fn class_labels_map_to_species_names() {
        assert_eq!(IrisClass::from_repr(0), Some(IrisClass::Setosa));
        assert_eq!(IrisClass::Virginica.to_string(), "virginica");
        assert_eq!(IrisClass::from_repr(3), None);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse("a,b,c,d,class\n5.1,3.5,1.4,0\n").unwrap_err();
        assert!(matches!(err, DatasetError::WrongArity { line: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_feature() {
        let err = parse("a,b,c,d,class\n5.1,oops,1.4,0.2,0\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn rejects_out_of_range_label() {
        let err = parse("a,b,c,d,class\n5.1,3.5,1.4,0.2,7\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidLabel { line: 2, .. }));
    }
}
