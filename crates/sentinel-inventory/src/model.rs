use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sentinel_domain::{Condition, ConditionStatus, Resource, ResourceId, ResourceStatus, ResourceType};
use serde::Deserialize;

/// Wire envelope returned by the upstream inventory: `{"items": [...]}`.
/// Only `items` is consumed; pagination metadata, if any, is ignored.
#[derive(Debug, Deserialize)]
pub struct RawListEnvelope {
    #[serde(default)]
    pub items: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
pub struct RawResource {
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub generation: u64,
    pub created_time: DateTime<Utc>,
    #[serde(default = "default_timestamp")]
    pub updated_time: DateTime<Utc>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub status: Option<RawStatus>,
}

fn default_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

#[derive(Debug, Deserialize)]
pub struct RawStatus {
    #[serde(default = "default_timestamp")]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub observed_generation: u64,
    #[serde(default)]
    pub conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    #[serde(default = "default_timestamp")]
    pub last_transition_time: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Converts a raw item into a domain `Resource`, attaching the resource kind
/// the caller requested (the upstream does not echo it per-item).
pub fn into_resource(raw: RawResource, kind: ResourceType) -> Resource {
    let status = raw.status.map(|s| ResourceStatus {
        last_updated: s.last_updated,
        observed_generation: s.observed_generation,
        conditions: s
            .conditions
            .into_iter()
            .map(|c| Condition {
                type_: c.type_,
                status: c.status,
                last_transition_time: c.last_transition_time,
                reason: c.reason,
                message: c.message,
            })
            .collect(),
    });

    Resource {
        id: ResourceId::new(raw.id),
        href: raw.href,
        kind,
        generation: raw.generation,
        created_time: raw.created_time,
        updated_time: raw.updated_time,
        labels: raw.labels,
        status,
    }
}
