use async_trait::async_trait;
use sentinel_events::CloudEvent;

use crate::error::PublishError;

/// The narrow capability set the sentinel loop depends on. No assumption is
/// made about the underlying broker beyond these three operations; concrete
/// implementations (NATS, AMQP, Pub/Sub, SQS, an in-memory mock) are injected.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, event: &CloudEvent) -> Result<(), PublishError>;

    /// Flush and release resources. Idempotent: safe to call more than once.
    async fn close(&self) -> Result<(), PublishError>;

    /// `Ok(())` if the broker is reachable, an error otherwise. Consumed by
    /// the readiness probe named `broker`.
    async fn health(&self) -> Result<(), PublishError>;
}
