use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("invalid resource id: {0}")]
    InvalidResourceId(String),
}
