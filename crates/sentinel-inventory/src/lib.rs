pub mod client;
pub mod error;
pub mod model;
pub mod retry;

pub use client::{HttpInventoryClient, InventoryClient};
pub use error::InventoryError;
pub use retry::retriable;
