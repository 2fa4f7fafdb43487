use chrono::{DateTime, Utc};
use sentinel_domain::{DecisionReason, Resource};
use serde::Serialize;
use uuid::Uuid;

use crate::error::EventError;
use crate::event::{CloudEvent, DATA_CONTENT_TYPE, SOURCE, SPEC_VERSION};

#[derive(Serialize)]
struct EventData<'a> {
    kind: &'static str,
    id: &'a str,
    generation: u64,
    href: &'a str,
    reason: &'static str,
}

/// Materializes a CloudEvent from a resource and the reason it is being
/// reconciled. `now` is passed in by the caller (defaulting to `Utc::now()`
/// at the call site) rather than read internally, keeping this testable.
pub fn build_event(
    resource: &Resource,
    reason: DecisionReason,
    now: DateTime<Utc>,
) -> Result<CloudEvent, EventError> {
    let data = EventData {
        kind: resource.kind.kind_name(),
        id: resource.id.as_str(),
        generation: resource.generation,
        href: &resource.href,
        reason: reason.as_label(),
    };

    let data = serde_json::to_value(&data).map_err(|source| EventError::DataSerialization {
        resource_id: resource.id.to_string(),
        source,
    })?;

    Ok(CloudEvent {
        specversion: SPEC_VERSION.to_string(),
        type_: format!("com.redhat.hyperfleet.{}.reconcile", resource.kind.kind_name()),
        source: SOURCE.to_string(),
        id: Uuid::new_v4().to_string(),
        time: now,
        datacontenttype: DATA_CONTENT_TYPE.to_string(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sentinel_domain::{ResourceId, ResourceType};
    use std::collections::BTreeMap;

    fn resource() -> Resource {
        let now = Utc::now();
        Resource {
            id: ResourceId::new("cluster-1"),
            href: "/clusters/cluster-1".into(),
            kind: ResourceType::Clusters,
            generation: 2,
            created_time: now - Duration::hours(1),
            updated_time: now,
            labels: BTreeMap::new(),
            status: None,
        }
    }

    #[test]
    fn builds_expected_envelope() {
        let now = Utc::now();
        let event = build_event(&resource(), DecisionReason::MaxAgeExceeded, now).unwrap();
        assert_eq!(event.specversion, "1.0");
        assert_eq!(event.type_, "com.redhat.hyperfleet.Cluster.reconcile");
        assert_eq!(event.source, "hyperfleet-sentinel");
        assert_eq!(event.datacontenttype, "application/json");
        assert_eq!(event.time, now);
        assert_eq!(event.data["id"], "cluster-1");
        assert_eq!(event.data["generation"], 2);
        assert_eq!(event.data["reason"], "max age exceeded");
    }

    #[test]
    fn fresh_uuid_per_event() {
        let now = Utc::now();
        let a = build_event(&resource(), DecisionReason::GenerationChanged, now).unwrap();
        let b = build_event(&resource(), DecisionReason::GenerationChanged, now).unwrap();
        assert_ne!(a.id, b.id);
    }
}
