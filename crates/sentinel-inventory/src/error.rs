use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("inventory unavailable after retries: {0}")]
    Unavailable(String),

    #[error("fetch canceled")]
    Canceled,
}
