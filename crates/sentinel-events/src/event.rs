use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CloudEvents v1.0 envelope. Events have no identity beyond `id` and carry
/// no retry semantics: a publish failure drops this event, it is never
/// reconstructed and resent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent {
    pub specversion: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub source: String,
    pub id: String,
    pub time: DateTime<Utc>,
    pub datacontenttype: String,
    pub data: Value,
}

pub const SOURCE: &str = "hyperfleet-sentinel";
pub const SPEC_VERSION: &str = "1.0";
pub const DATA_CONTENT_TYPE: &str = "application/json";
