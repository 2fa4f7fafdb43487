use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawSentinelConfig {
    pub resource_type: String,

    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    #[serde(with = "humantime_serde")]
    pub max_age_ready: Duration,

    #[serde(with = "humantime_serde")]
    pub max_age_not_ready: Duration,

    #[serde(default)]
    pub resource_selector: Vec<RawLabelMatch>,

    pub topic: String,

    pub hyperfleet_api: RawHyperfleetApi,

    #[serde(default)]
    pub message_data: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLabelMatch {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct RawHyperfleetApi {
    pub endpoint: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}
