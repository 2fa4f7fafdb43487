pub mod error;
pub mod in_memory;
pub mod nats;
pub mod publisher;

pub use error::PublishError;
pub use in_memory::InMemoryPublisher;
pub use nats::NatsPublisher;
pub use publisher::Publisher;
