use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use sentinel_domain::{LabelSelector, Resource, ResourceType};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::InventoryError;
use crate::model::{into_resource, RawListEnvelope};
use crate::retry::retriable;

/// Abstraction the sentinel loop depends on, so production code and tests
/// can swap the concrete transport without touching the loop.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    async fn fetch(
        &self,
        token: &CancellationToken,
        kind: ResourceType,
        selector: &LabelSelector,
    ) -> Result<Vec<Resource>, InventoryError>;
}

/// Production client backed by `reqwest`, retrying transient failures with
/// capped exponential backoff and jitter.
pub struct HttpInventoryClient {
    client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

impl HttpInventoryClient {
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Self {
        HttpInventoryClient {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            request_timeout,
        }
    }

    fn backoff_policy() -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_millis(500),
            multiplier: 2.0,
            randomization_factor: 0.1,
            max_interval: Duration::from_secs(8),
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..ExponentialBackoff::default()
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<RawListEnvelope, backoff::Error<InventoryError>> {
        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| backoff::Error::transient(InventoryError::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let err = InventoryError::Unavailable(format!("upstream returned {status}"));
            return if retriable(status.as_u16()) {
                Err(backoff::Error::transient(err))
            } else {
                Err(backoff::Error::permanent(err))
            };
        }

        response
            .json::<RawListEnvelope>()
            .await
            .map_err(|e| backoff::Error::permanent(InventoryError::Unavailable(format!("malformed response body: {e}"))))
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn fetch(
        &self,
        token: &CancellationToken,
        kind: ResourceType,
        selector: &LabelSelector,
    ) -> Result<Vec<Resource>, InventoryError> {
        if token.is_cancelled() {
            return Err(InventoryError::Canceled);
        }

        let mut url = format!("{}/{}", self.endpoint.trim_end_matches('/'), kind.path_segment());
        if !selector.is_empty() {
            url = format!("{url}?search={}", selector.to_search_string());
        }

        let envelope: RawListEnvelope = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(InventoryError::Canceled),
            result = backoff::future::retry(Self::backoff_policy(), || self.fetch_once(&url)) => result?,
        };

        let mut resources = Vec::with_capacity(envelope.items.len());
        for raw in envelope.items {
            if raw.status.is_none() {
                warn!(resource_id = %raw.id, kind = %kind, "skipping inventory item with missing status");
                continue;
            }
            resources.push(into_resource(raw, kind));
        }
        Ok(resources)
    }
}
