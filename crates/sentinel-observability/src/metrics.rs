use prometheus::{CounterVec, GaugeVec, HistogramVec, Opts, Registry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to register {name}: {source}")]
    Registration {
        name: &'static str,
        #[source]
        source: prometheus::Error,
    },
}

/// Fixed metric schema, registered exactly once against a `prometheus::Registry`.
/// A second registration against the same registry is idempotent: the
/// `AlreadyReg` error is swallowed and the existing collectors are reused.
pub struct MetricsRegistry {
    pending_resources: GaugeVec,
    events_published_total: CounterVec,
    resources_skipped_total: CounterVec,
    poll_duration_seconds: HistogramVec,
    api_errors_total: CounterVec,
    broker_errors_total: CounterVec,
}

fn register_gauge_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<GaugeVec, MetricsError> {
    let vec = GaugeVec::new(Opts::new(name, help), labels)
        .map_err(|source| MetricsError::Registration { name, source })?;
    match registry.register(Box::new(vec.clone())) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(vec),
        Err(source) => Err(MetricsError::Registration { name, source }),
    }
}

fn register_counter_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<CounterVec, MetricsError> {
    let vec = CounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| MetricsError::Registration { name, source })?;
    match registry.register(Box::new(vec.clone())) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(vec),
        Err(source) => Err(MetricsError::Registration { name, source }),
    }
}

fn register_histogram_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<HistogramVec, MetricsError> {
    let opts = prometheus::HistogramOpts::new(name, help);
    let vec = HistogramVec::new(opts, labels)
        .map_err(|source| MetricsError::Registration { name, source })?;
    match registry.register(Box::new(vec.clone())) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(vec),
        Err(source) => Err(MetricsError::Registration { name, source }),
    }
}

impl MetricsRegistry {
    pub fn new(registry: &Registry) -> Result<Self, MetricsError> {
        Ok(MetricsRegistry {
            pending_resources: register_gauge_vec(
                registry,
                "pending_resources",
                "Number of resources flagged for publish in the current cycle",
                &["resource_type", "resource_selector"],
            )?,
            events_published_total: register_counter_vec(
                registry,
                "events_published_total",
                "Total reconciliation events published",
                &["resource_type", "resource_selector", "reason"],
            )?,
            resources_skipped_total: register_counter_vec(
                registry,
                "resources_skipped_total",
                "Total resources evaluated but not published",
                &["resource_type", "resource_selector", "reason"],
            )?,
            poll_duration_seconds: register_histogram_vec(
                registry,
                "poll_duration_seconds",
                "Duration of a fetch-decide-publish cycle",
                &["resource_type", "resource_selector"],
            )?,
            api_errors_total: register_counter_vec(
                registry,
                "api_errors_total",
                "Total inventory API errors",
                &["resource_type", "resource_selector", "error_type"],
            )?,
            broker_errors_total: register_counter_vec(
                registry,
                "broker_errors_total",
                "Total broker publish errors",
                &["resource_type", "resource_selector", "error_type"],
            )?,
        })
    }

    pub fn set_pending_resources(&self, resource_type: &str, selector: &str, count: f64) {
        if resource_type.is_empty() || selector.is_empty() {
            return;
        }
        self.pending_resources
            .with_label_values(&[resource_type, selector])
            .set(count.max(0.0));
    }

    pub fn inc_events_published(&self, resource_type: &str, selector: &str, reason: &str) {
        if resource_type.is_empty() || selector.is_empty() || reason.is_empty() {
            return;
        }
        self.events_published_total
            .with_label_values(&[resource_type, selector, reason])
            .inc();
    }

    pub fn inc_resources_skipped(&self, resource_type: &str, selector: &str, reason: &str) {
        if resource_type.is_empty() || selector.is_empty() || reason.is_empty() {
            return;
        }
        self.resources_skipped_total
            .with_label_values(&[resource_type, selector, reason])
            .inc();
    }

    pub fn observe_poll_duration(&self, resource_type: &str, selector: &str, seconds: f64) {
        if resource_type.is_empty() || selector.is_empty() || seconds < 0.0 {
            return;
        }
        self.poll_duration_seconds
            .with_label_values(&[resource_type, selector])
            .observe(seconds);
    }

    pub fn inc_api_errors(&self, resource_type: &str, selector: &str, error_type: &str) {
        if resource_type.is_empty() || selector.is_empty() || error_type.is_empty() {
            return;
        }
        self.api_errors_total
            .with_label_values(&[resource_type, selector, error_type])
            .inc();
    }

    pub fn inc_broker_errors(&self, resource_type: &str, selector: &str, error_type: &str) {
        if resource_type.is_empty() || selector.is_empty() || error_type.is_empty() {
            return;
        }
        self.broker_errors_total
            .with_label_values(&[resource_type, selector, error_type])
            .inc();
    }
}
