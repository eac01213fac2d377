pub mod cache;
pub mod config;
pub mod handler;

pub use cache::{CacheError, ModelCache};
pub use config::ServingConfig;
pub use handler::{Event, Response, ServeError, handle};
