use anyhow::Context;
use std::path::PathBuf;
use tepal::artifact::{self, MODEL_OBJECT_KEY};
use tepal::dataset::{NUM_CLASSES, load_iris};
use tepal::svm::{MultiClassSvm, SmoParams};

const TRAINING_SEED: u64 = 42;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let samples = load_iris().context("bundled iris dataset is malformed")?;
    log::info!("loaded {} training samples", samples.len());

    let model = MultiClassSvm::fit(&samples, NUM_CLASSES, &SmoParams::default(), TRAINING_SEED)
        .context("training failed")?;
    log::info!(
        "fitted {} pairwise machines with {} support vectors",
        model.machines.len(),
        model.support_vector_count()
    );

    let path = PathBuf::from(MODEL_OBJECT_KEY);
    artifact::save_model(&model, &path)
        .with_context(|| format!("failed to write model artifact to `{}`", path.display()))?;
    log::info!("model artifact written to `{}`", path.display());
    Ok(())
}
