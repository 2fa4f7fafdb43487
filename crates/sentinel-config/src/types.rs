use std::collections::BTreeMap;
use std::time::Duration;

use sentinel_domain::{LabelSelector, ResourceType};

#[derive(Debug, Clone)]
pub struct HyperfleetApiConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

/// Immutable for the lifetime of a run. Loaded once at startup; nothing in
/// the core mutates it after construction.
#[derive(Debug, Clone)]
pub struct SentinelConfig {
    pub resource_type: ResourceType,
    pub poll_interval: Duration,
    pub max_age_ready: Duration,
    pub max_age_not_ready: Duration,
    pub resource_selector: LabelSelector,
    pub topic: String,
    pub hyperfleet_api: HyperfleetApiConfig,
    pub message_data: BTreeMap<String, String>,
}
