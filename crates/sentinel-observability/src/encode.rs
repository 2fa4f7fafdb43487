use prometheus::{Encoder, Registry, TextEncoder};

use crate::metrics::MetricsError;

/// Render the registry's current state as Prometheus text exposition format.
pub fn encode_text(registry: &Registry) -> Result<String, MetricsError> {
    let encoder = TextEncoder::new();
    let families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|source| MetricsError::Registration {
            name: "metrics_encode",
            source,
        })?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
