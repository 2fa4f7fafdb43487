pub mod encode;
pub mod metrics;
pub mod readiness;

pub use encode::encode_text;
pub use metrics::{MetricsError, MetricsRegistry};
pub use readiness::{Probe, ProbeStatus, ReadinessRegistry};
