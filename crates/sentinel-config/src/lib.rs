pub mod error;
pub mod loader;
pub mod raw;
pub mod template;
pub mod types;

pub use error::ConfigError;
pub use loader::load;
pub use types::{HyperfleetApiConfig, SentinelConfig};
