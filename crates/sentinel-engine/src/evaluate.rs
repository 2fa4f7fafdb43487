use chrono::{DateTime, Utc};
use sentinel_domain::{Decision, DecisionReason, Resource};

use crate::policy::AgePolicy;

/// Sentinel zero value for a clock reading. Chosen as the Unix epoch rather
/// than `DateTime::<Utc>::MIN_UTC`: it is the value `DateTime::<Utc>::default()`
/// never produces but a misconfigured caller plausibly could, and it reads
/// clearly in logs. See DESIGN.md for the rationale.
pub fn zero_clock() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn is_zero(t: DateTime<Utc>) -> bool {
    t <= DateTime::<Utc>::UNIX_EPOCH
}

/// Pure, side-effect-free reconciliation policy. Same inputs always yield
/// the same output; safe to call from any thread.
pub fn evaluate(resource: Option<&Resource>, now: DateTime<Utc>, policy: &AgePolicy) -> Decision {
    let Some(resource) = resource else {
        return Decision::new(DecisionReason::NilResource);
    };

    if is_zero(now) {
        return Decision::new(DecisionReason::ZeroClock);
    }

    let Some(status) = resource.status.as_ref() else {
        // No status yet: treat as never-observed, not-ready, and let the
        // age ceiling below decide based on created_time.
        return evaluate_without_status(resource, now, policy);
    };

    if resource.generation > status.observed_generation {
        return Decision::new(DecisionReason::GenerationChanged);
    }

    let reference = if is_zero(status.last_updated) {
        resource.created_time
    } else {
        status.last_updated
    };

    let max_age = policy.ceiling_for(status.ready());
    decide_by_age(reference, now, max_age)
}

fn evaluate_without_status(resource: &Resource, now: DateTime<Utc>, policy: &AgePolicy) -> Decision {
    let max_age = policy.ceiling_for(false);
    decide_by_age(resource.created_time, now, max_age)
}

fn decide_by_age(
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
    max_age: chrono::Duration,
) -> Decision {
    let next_event = reference + max_age;
    if now < next_event {
        let remaining = next_event - now;
        Decision::with_message(
            DecisionReason::MaxAgeNotExceeded,
            format!("next eligible in {remaining}"),
        )
    } else {
        Decision::new(DecisionReason::MaxAgeExceeded)
    }
}
