use std::sync::Arc;

use sentinel_observability::ReadinessRegistry;

#[derive(Clone)]
pub struct HealthState {
    pub readiness: Arc<ReadinessRegistry>,
}

#[derive(Clone)]
pub struct MetricsState {
    pub registry: Arc<prometheus::Registry>,
}
