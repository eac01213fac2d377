use crate::dataset::{IrisClass, NUM_FEATURES};
use crate::serving::cache::{CacheError, ModelCache};
use crate::serving::config::ServingConfig;
use crate::store::ObjectStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

/// Query-string parameters every invocation must carry, in feature order.
pub const REQUIRED_PARAMETERS: [&str; NUM_FEATURES] =
    ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Incoming invocation envelope, shaped like a gateway-proxied function
/// event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub query_string_parameters: HashMap<String, String>,
}

impl Event {
    pub fn from_parameters<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Event {
            query_string_parameters: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Outgoing invocation envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("parameter `{name}` is not numeric: `{value}`")]
    InvalidParameter { name: &'static str, value: String },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Answers one classification invocation.
///
/// Ensures the model is resident (fetching on a cold start), validates the
/// four feature parameters into numbers at the boundary, and wraps the
/// predicted class in the fixed JSON envelope. Validation and load failures
/// come back as structured errors rather than panics.
pub fn handle(
    event: &Event,
    cache: &mut ModelCache,
    store: &dyn ObjectStore,
    config: &ServingConfig,
) -> Result<Response, ServeError> {
    let model = cache.ensure_loaded(store, config)?;
    let features = parse_features(event)?;
    let class = model.predict(&features);
    if let Some(label) = IrisClass::from_repr(class) {
        log::info!("predicted class {class} ({label})");
    }

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    Ok(Response {
        status_code: 200,
        headers,
        body: json!({ "PredictedIrisClass": class }).to_string(),
    })
}

fn parse_features(event: &Event) -> Result<Vec<f64>, ServeError> {
    REQUIRED_PARAMETERS
        .iter()
        .map(|&name| {
            let raw = event
                .query_string_parameters
                .get(name)
                .ok_or(ServeError::MissingParameter(name))?;
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ServeError::InvalidParameter {
                    name,
                    value: raw.clone(),
                })
        })
        .collect()
}
