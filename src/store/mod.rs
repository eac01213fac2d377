use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the bucket the model artifact lives in.
pub const BUCKET_ENV_VAR: &str = "MODEL_BUCKET";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bucket environment variable `{0}` is not set")]
    MissingBucket(String),

    #[error("object `{key}` not found in bucket `{bucket}`")]
    ObjectNotFound { bucket: String, key: String },

    #[error("store i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Download-only view of the artifact bucket. The serving layer depends on
/// this trait so tests can observe or fake fetches.
pub trait ObjectStore {
    fn download(&self, key: &str, destination: &Path) -> Result<(), StoreError>;
}

/// Object store backed by a directory tree: the bucket is a local root and
/// object keys are paths beneath it.
#[derive(Debug)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsObjectStore { root: root.into() }
    }

    /// Resolves the bucket root from [`BUCKET_ENV_VAR`].
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_env_var(BUCKET_ENV_VAR)
    }

    pub fn from_env_var(name: &str) -> Result<Self, StoreError> {
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => Ok(Self::new(value)),
            _ => Err(StoreError::MissingBucket(name.to_string())),
        }
    }
}

impl ObjectStore for FsObjectStore {
    fn download(&self, key: &str, destination: &Path) -> Result<(), StoreError> {
        let source = self.root.join(key);
        if !source.is_file() {
            return Err(StoreError::ObjectNotFound {
                bucket: self.root.display().to_string(),
                key: key.to_string(),
            });
        }
        fs::copy(&source, destination)?;
        log::info!(
            "fetched object `{key}` from bucket `{}`",
            self.root.display()
        );
        Ok(())
    }
}
