use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Worth retrying at a higher layer (the loop does not retry publishes,
    /// but callers composing over this contract may).
    #[error("transient publish failure: {0}")]
    Transient(String),

    #[error("fatal publish failure: {0}")]
    Fatal(String),
}

impl PublishError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PublishError::Transient(_))
    }
}
