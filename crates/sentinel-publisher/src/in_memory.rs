use async_trait::async_trait;
use sentinel_events::CloudEvent;
use tokio::sync::Mutex;

use crate::error::PublishError;
use crate::publisher::Publisher;

/// Test double that records every `(topic, event)` pair it receives. Can be
/// configured to fail publish/health calls to exercise the loop's graceful
/// degradation paths.
pub struct InMemoryPublisher {
    published: Mutex<Vec<(String, CloudEvent)>>,
    close_calls: Mutex<u32>,
    fail_publish: bool,
    fail_health: bool,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        InMemoryPublisher {
            published: Mutex::new(Vec::new()),
            close_calls: Mutex::new(0),
            fail_publish: false,
            fail_health: false,
        }
    }

    pub fn failing_publish() -> Self {
        InMemoryPublisher {
            fail_publish: true,
            ..InMemoryPublisher::new()
        }
    }

    pub fn failing_health() -> Self {
        InMemoryPublisher {
            fail_health: true,
            ..InMemoryPublisher::new()
        }
    }

    pub async fn published(&self) -> Vec<(String, CloudEvent)> {
        self.published.lock().await.clone()
    }

    pub async fn close_call_count(&self) -> u32 {
        *self.close_calls.lock().await
    }
}

impl Default for InMemoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for InMemoryPublisher {
    async fn publish(&self, topic: &str, event: &CloudEvent) -> Result<(), PublishError> {
        if self.fail_publish {
            return Err(PublishError::Transient("forced publish failure".into()));
        }
        self.published
            .lock()
            .await
            .push((topic.to_string(), event.clone()));
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        *self.close_calls.lock().await += 1;
        Ok(())
    }

    async fn health(&self) -> Result<(), PublishError> {
        if self.fail_health {
            return Err(PublishError::Transient("forced health failure".into()));
        }
        Ok(())
    }
}
