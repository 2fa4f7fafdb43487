use chrono::Duration;

/// Age ceilings the engine checks a resource's `last_updated` against,
/// threaded in from configuration rather than read from global state.
#[derive(Debug, Clone, Copy)]
pub struct AgePolicy {
    pub max_age_ready: Duration,
    pub max_age_not_ready: Duration,
}

impl AgePolicy {
    pub fn new(max_age_ready: Duration, max_age_not_ready: Duration) -> Self {
        AgePolicy {
            max_age_ready,
            max_age_not_ready,
        }
    }

    /// Ceiling applicable to a resource with the given readiness.
    pub fn ceiling_for(&self, ready: bool) -> Duration {
        if ready {
            self.max_age_ready
        } else {
            self.max_age_not_ready
        }
    }
}
