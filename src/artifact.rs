use crate::svm::MultiClassSvm;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Fixed object key under which the trainer publishes the model and the
/// predictor looks it up.
pub const MODEL_OBJECT_KEY: &str = "svm_model.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn save_model(model: &MultiClassSvm, path: &Path) -> Result<(), ArtifactError> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), model)?;
    Ok(())
}

pub fn load_model(path: &Path) -> Result<MultiClassSvm, ArtifactError> {
    let file = File::open(path)?;
    let model = serde_json::from_reader(BufReader::new(file))?;
    Ok(model)
}
