pub mod decision;
pub mod error;
pub mod types;

pub use decision::{Decision, DecisionReason};
pub use error::DomainError;
pub use types::{
    Condition, ConditionStatus, LabelMatch, LabelSelector, Resource, ResourceId, ResourceStatus,
    ResourceType,
};
