use crate::artifact::MODEL_OBJECT_KEY;
use std::path::{Path, PathBuf};

/// Where the predictor looks for the artifact: the object key in the bucket
/// and the ephemeral local path that doubles as the "already fetched" marker.
#[derive(Debug, Clone)]
pub struct ServingConfig {
    pub object_key: String,
    pub local_model_path: PathBuf,
}

impl Default for ServingConfig {
    fn default() -> Self {
        ServingConfig {
            object_key: MODEL_OBJECT_KEY.to_string(),
            local_model_path: Path::new("/tmp").join(MODEL_OBJECT_KEY),
        }
    }
}

impl ServingConfig {
    /// Same key layout, but with ephemeral storage rooted at `dir`. Tests use
    /// this to isolate each simulated execution context.
    pub fn with_local_dir(dir: &Path) -> Self {
        ServingConfig {
            object_key: MODEL_OBJECT_KEY.to_string(),
            local_model_path: dir.join(MODEL_OBJECT_KEY),
        }
    }
}
