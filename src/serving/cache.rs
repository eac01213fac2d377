use crate::artifact::{self, ArtifactError};
use crate::serving::config::ServingConfig;
use crate::store::{ObjectStore, StoreError};
use crate::svm::MultiClassSvm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Per-execution-context model cache.
///
/// Owns the deserialized model for the lifetime of the context. The artifact
/// file on local ephemeral storage is the "already fetched" marker; the slot
/// holds the in-memory model. Both start empty on a cold start and survive
/// across invocations until the hosting environment recycles the context.
#[derive(Default)]
pub struct ModelCache {
    slot: Option<MultiClassSvm>,
}

impl ModelCache {
    pub fn new() -> Self {
        ModelCache { slot: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    /// Drops the in-memory model, as a recycled execution context would.
    pub fn reset(&mut self) {
        self.slot = None;
    }

    /// Makes the model available, fetching and deserializing only when
    /// needed:
    ///
    /// - no marker file: fetch from the store, then load, then fill the slot;
    /// - marker present but slot empty: reload from local storage. The slot
    ///   update is unconditional, so a reset slot can never be served stale;
    /// - marker present and slot filled: reuse the in-memory model.
    pub fn ensure_loaded(
        &mut self,
        store: &dyn ObjectStore,
        config: &ServingConfig,
    ) -> Result<&MultiClassSvm, CacheError> {
        let marker_present = config.local_model_path.exists();
        if !marker_present {
            log::info!(
                "no local artifact: fetching `{}` from the object store",
                config.object_key
            );
            store.download(&config.object_key, &config.local_model_path)?;
        }

        if marker_present && self.slot.is_some() {
            log::debug!("reusing model already loaded in this execution context");
            return Ok(self.slot.as_ref().unwrap());
        }

        let model = artifact::load_model(&config.local_model_path)?;
        log::info!("model loaded into execution context");
        Ok(self.slot.insert(model))
    }
}
