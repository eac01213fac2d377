pub mod artifact;
pub mod dataset;
pub mod serving;
pub mod store;
pub mod svm;
