pub mod iris;

pub use iris::{DatasetError, IrisClass, LabeledSample, NUM_CLASSES, NUM_FEATURES, load_iris};
