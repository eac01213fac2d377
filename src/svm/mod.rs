pub mod kernel;
pub mod multiclass;
pub mod smo;

pub use kernel::PolynomialKernel;
pub use multiclass::MultiClassSvm;
pub use smo::{BinarySvm, SmoParams};
