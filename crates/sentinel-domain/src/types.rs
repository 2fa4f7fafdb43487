use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// ── Identifiers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(s: impl Into<String>) -> Self {
        ResourceId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── ResourceType ──────────────────────────────────────────────────────────────

/// Closed set of inventory resource kinds the sentinel knows how to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Clusters,
    Nodepools,
}

impl ResourceType {
    /// The CloudEvents `type` suffix / inventory path segment for this kind,
    /// e.g. `Cluster` for `clusters`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ResourceType::Clusters => "Cluster",
            ResourceType::Nodepools => "NodePool",
        }
    }

    /// The inventory API path segment, e.g. `clusters`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceType::Clusters => "clusters",
            ResourceType::Nodepools => "nodepools",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clusters" => Ok(ResourceType::Clusters),
            "nodepools" => Ok(ResourceType::Nodepools),
            other => Err(DomainError::UnknownResourceType(other.to_string())),
        }
    }
}

// ── LabelSelector ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatch {
    pub label: String,
    pub value: String,
}

/// Ordered sequence of label matches, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelector(pub Vec<LabelMatch>);

impl LabelSelector {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collapse duplicate labels (last-wins) into a sorted map, then join as
    /// `key=value` pairs separated by commas — the deterministic `search`
    /// query parameter the inventory client sends.
    pub fn to_search_string(&self) -> String {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        for m in &self.0 {
            map.insert(m.label.as_str(), m.value.as_str());
        }
        map.into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ── Conditions / status ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    pub last_transition_time: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub last_updated: DateTime<Utc>,
    pub observed_generation: u64,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl ResourceStatus {
    /// `ready = true` iff a condition of type `Ready` exists with status `True`.
    pub fn ready(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.type_ == "Ready" && c.status == ConditionStatus::True)
    }
}

// ── Resource ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub href: String,
    pub kind: ResourceType,
    pub generation: u64,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Absent while the resource is being provisioned or deleted — a
    /// legitimate transient state, never an error (see DomainError variants).
    pub status: Option<ResourceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_selector_sorts_and_collapses_duplicates() {
        let sel = LabelSelector(vec![
            LabelMatch { label: "zone".into(), value: "us-east".into() },
            LabelMatch { label: "env".into(), value: "staging".into() },
            LabelMatch { label: "env".into(), value: "prod".into() }, // last wins
        ]);
        assert_eq!(sel.to_search_string(), "env=prod,zone=us-east");
    }

    #[test]
    fn empty_selector_is_empty_string() {
        assert_eq!(LabelSelector::default().to_search_string(), "");
        assert!(LabelSelector::default().is_empty());
    }

    #[test]
    fn ready_derived_from_ready_condition_true() {
        let status = ResourceStatus {
            last_updated: Utc::now(),
            observed_generation: 1,
            conditions: vec![Condition {
                type_: "Ready".into(),
                status: ConditionStatus::True,
                last_transition_time: Utc::now(),
                reason: None,
                message: None,
            }],
        };
        assert!(status.ready());
    }

    #[test]
    fn ready_false_when_no_ready_condition() {
        let status = ResourceStatus {
            last_updated: Utc::now(),
            observed_generation: 1,
            conditions: vec![],
        };
        assert!(!status.ready());
    }

    #[test]
    fn ready_false_when_ready_condition_not_true() {
        let status = ResourceStatus {
            last_updated: Utc::now(),
            observed_generation: 1,
            conditions: vec![Condition {
                type_: "Ready".into(),
                status: ConditionStatus::False,
                last_transition_time: Utc::now(),
                reason: None,
                message: None,
            }],
        };
        assert!(!status.ready());
    }

    #[test]
    fn resource_type_round_trips_through_str() {
        use std::str::FromStr;
        assert_eq!(ResourceType::from_str("clusters").unwrap(), ResourceType::Clusters);
        assert_eq!(ResourceType::from_str("nodepools").unwrap(), ResourceType::Nodepools);
        assert!(ResourceType::from_str("widgets").is_err());
    }

    #[test]
    fn resource_round_trips_through_json() {
        let resource = Resource {
            id: ResourceId::new("abc-123"),
            href: "/api/clusters/abc-123".into(),
            kind: ResourceType::Clusters,
            generation: 4,
            created_time: Utc::now(),
            updated_time: Utc::now(),
            labels: BTreeMap::new(),
            status: None,
        };

        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, resource.id);
        assert_eq!(back.kind, resource.kind);
        assert_eq!(back.generation, resource.generation);
    }
}
