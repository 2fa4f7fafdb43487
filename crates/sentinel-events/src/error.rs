use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to serialize event data for resource {resource_id}: {source}")]
    DataSerialization {
        resource_id: String,
        #[source]
        source: serde_json::Error,
    },
}
