use anyhow::{Context, bail};
use tepal::serving::handler::REQUIRED_PARAMETERS;
use tepal::serving::{Event, ModelCache, ServingConfig, handle};
use tepal::store::FsObjectStore;

/// Simulates one function invocation from the command line: builds the event
/// from the four feature arguments, runs the handler against the configured
/// bucket, and prints the response body.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != REQUIRED_PARAMETERS.len() {
        bail!("usage: invoke <sepal_length> <sepal_width> <petal_length> <petal_width>");
    }
    let event = Event::from_parameters(
        REQUIRED_PARAMETERS
            .iter()
            .copied()
            .zip(args.iter().map(String::as_str)),
    );

    let store = FsObjectStore::from_env().context("object store bucket is not configured")?;
    let config = ServingConfig::default();
    let mut cache = ModelCache::new();

    let response = handle(&event, &mut cache, &store, &config)?;
    println!("{}", response.body);
    Ok(())
}
