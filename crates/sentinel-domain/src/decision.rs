/// Why the engine decided to publish (or skip) a reconciliation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    MaxAgeExceeded,
    GenerationChanged,
    MaxAgeNotExceeded,
    NilResource,
    ZeroClock,
}

impl DecisionReason {
    /// `true` iff this reason should trigger a publish — the only two
    /// publishing reasons are a generation bump or an aged-out resource.
    pub fn should_publish(&self) -> bool {
        matches!(
            self,
            DecisionReason::MaxAgeExceeded | DecisionReason::GenerationChanged
        )
    }

    /// Lowercase, space-separated text used in metrics labels and logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DecisionReason::MaxAgeExceeded => "max age exceeded",
            DecisionReason::GenerationChanged => "generation changed",
            DecisionReason::MaxAgeNotExceeded => "max age not exceeded",
            DecisionReason::NilResource => "nil resource",
            DecisionReason::ZeroClock => "zero clock",
        }
    }
}

/// The pure result of evaluating a single resource: no identity, no side
/// effects, safe to construct from any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub publish: bool,
    pub reason: DecisionReason,
    /// Human-readable detail (e.g. remaining wait), observability-only.
    pub message: Option<String>,
}

impl Decision {
    pub fn new(reason: DecisionReason) -> Self {
        Decision {
            publish: reason.should_publish(),
            reason,
            message: None,
        }
    }

    pub fn with_message(reason: DecisionReason, message: impl Into<String>) -> Self {
        Decision {
            publish: reason.should_publish(),
            reason,
            message: Some(message.into()),
        }
    }
}
