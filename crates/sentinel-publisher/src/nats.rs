use async_nats::connection::State;
use async_trait::async_trait;
use sentinel_events::CloudEvent;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::PublishError;
use crate::publisher::Publisher;

/// Production publisher backed by a NATS connection. `close` is idempotent:
/// repeated calls after the first are no-ops.
pub struct NatsPublisher {
    client: async_nats::Client,
    closed: Mutex<bool>,
}

impl NatsPublisher {
    pub async fn connect(url: &str) -> Result<Self, PublishError> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| PublishError::Fatal(e.to_string()))?;
        info!(url, "connected to broker");
        Ok(NatsPublisher {
            client,
            closed: Mutex::new(false),
        })
    }
}

#[async_trait]
impl Publisher for NatsPublisher {
    async fn publish(&self, topic: &str, event: &CloudEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| PublishError::Fatal(format!("event serialization failed: {e}")))?;
        self.client
            .publish(topic.to_string(), payload.into())
            .await
            .map_err(|e| PublishError::Transient(e.to_string()))
    }

    async fn close(&self) -> Result<(), PublishError> {
        let mut closed = self.closed.lock().await;
        if *closed {
            return Ok(());
        }
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Transient(e.to_string()))?;
        *closed = true;
        debug!("broker connection flushed and closed");
        Ok(())
    }

    async fn health(&self) -> Result<(), PublishError> {
        match self.client.connection_state() {
            State::Connected => Ok(()),
            other => Err(PublishError::Transient(format!("broker not connected: {other:?}"))),
        }
    }
}
