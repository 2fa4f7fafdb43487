use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("inventory fetch failed: {0}")]
    Fetch(#[from] sentinel_inventory::InventoryError),
}
