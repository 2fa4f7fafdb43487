pub mod error;
pub mod sentinel;

pub use error::LoopError;
pub use sentinel::Sentinel;
