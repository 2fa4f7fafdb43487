use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use sentinel_config::SentinelConfig;
use sentinel_engine::AgePolicy;
use sentinel_events::build_event;
use sentinel_inventory::InventoryClient;
use sentinel_observability::{MetricsRegistry, ReadinessRegistry};
use sentinel_publisher::Publisher;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The Poll → Decide → Publish control loop. Holds no state across cycles
/// beyond its immutable collaborators: it does not remember what it has
/// already published (see module docs in DESIGN.md).
pub struct Sentinel {
    config: SentinelConfig,
    inventory: Arc<dyn InventoryClient>,
    publisher: Arc<dyn Publisher>,
    metrics: Arc<MetricsRegistry>,
    readiness: Arc<ReadinessRegistry>,
    policy: AgePolicy,
}

impl Sentinel {
    pub fn new(
        config: SentinelConfig,
        inventory: Arc<dyn InventoryClient>,
        publisher: Arc<dyn Publisher>,
        metrics: Arc<MetricsRegistry>,
        readiness: Arc<ReadinessRegistry>,
    ) -> Self {
        let policy = AgePolicy::new(
            chrono::Duration::from_std(config.max_age_ready).unwrap_or(chrono::Duration::zero()),
            chrono::Duration::from_std(config.max_age_not_ready).unwrap_or(chrono::Duration::zero()),
        );
        Sentinel {
            config,
            inventory,
            publisher,
            metrics,
            readiness,
            policy,
        }
    }

    /// Runs until `token` is cancelled. An immediate first cycle executes
    /// before the periodic timer engages; ticks that arrive mid-cycle are
    /// coalesced (`MissedTickBehavior::Delay`), enforcing non-overlapping
    /// cycles.
    pub async fn run(&self, token: CancellationToken) {
        info!("sentinel loop starting");

        self.trigger(&token).await;

        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await; // consume the immediate tick already spent above

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("sentinel loop received cancellation, shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.trigger(&token).await;
                }
            }
        }

        if let Err(e) = self.publisher.close().await {
            warn!(error = %e, "error closing publisher during shutdown");
        }
        info!("sentinel loop stopped");
    }

    /// One fetch-decide-publish pass. Never panics on a per-resource
    /// failure; a fetch failure is logged and counted, not propagated —
    /// the outer loop always continues to the next tick.
    async fn trigger(&self, token: &CancellationToken) {
        let cycle_start = Instant::now();
        let resource_type = self.config.resource_type;
        let type_label = resource_type.path_segment();
        let raw_selector_label = self.config.resource_selector.to_search_string();
        // An empty selector is a legal config (§3); the metrics helpers reject
        // blank labels as a cardinality-hygiene guard, so substitute a
        // placeholder rather than let the no-selector case go unrecorded.
        let selector_label = if raw_selector_label.is_empty() {
            "<none>"
        } else {
            raw_selector_label.as_str()
        };

        let resources = match self
            .inventory
            .fetch(token, resource_type, &self.config.resource_selector)
            .await
        {
            Ok(resources) => resources,
            Err(e) => {
                self.metrics
                    .inc_api_errors(type_label, &selector_label, "fetch_error");
                warn!(error = %e, "inventory fetch failed, continuing to next cycle");
                return;
            }
        };

        let now = Utc::now();
        let mut pending = 0f64;

        for resource in &resources {
            let decision = sentinel_engine::evaluate(Some(resource), now, &self.policy);

            if decision.publish {
                pending += 1.0;

                let event = match build_event(resource, decision.reason, now) {
                    Ok(event) => event,
                    Err(e) => {
                        self.metrics
                            .inc_broker_errors(type_label, &selector_label, "publish_error");
                        warn!(error = %e, resource_id = %resource.id, "failed to build event");
                        continue;
                    }
                };

                match self.publisher.publish(&self.config.topic, &event).await {
                    Ok(()) => {
                        self.metrics.inc_events_published(
                            type_label,
                            &selector_label,
                            decision.reason.as_label(),
                        );
                    }
                    Err(e) => {
                        self.metrics
                            .inc_broker_errors(type_label, &selector_label, "publish_error");
                        warn!(error = %e, resource_id = %resource.id, "publish failed, continuing");
                    }
                }
            } else {
                self.metrics.inc_resources_skipped(
                    type_label,
                    &selector_label,
                    decision.reason.as_label(),
                );
            }
        }

        self.metrics
            .set_pending_resources(type_label, &selector_label, pending);
        self.metrics.observe_poll_duration(
            type_label,
            &selector_label,
            cycle_start.elapsed().as_secs_f64(),
        );

        debug!(
            resource_count = resources.len(),
            pending, "cycle complete"
        );
    }

    pub fn readiness(&self) -> Arc<ReadinessRegistry> {
        self.readiness.clone()
    }
}
