use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sentinel_config::{HyperfleetApiConfig, SentinelConfig};
use sentinel_core::Sentinel;
use sentinel_domain::{
    Condition, ConditionStatus, LabelSelector, Resource, ResourceId, ResourceStatus, ResourceType,
};
use sentinel_inventory::{InventoryClient, InventoryError};
use sentinel_observability::{MetricsRegistry, ReadinessRegistry};
use sentinel_publisher::InMemoryPublisher;
use tokio_util::sync::CancellationToken;

fn base_config(poll_interval: StdDuration) -> SentinelConfig {
    SentinelConfig {
        resource_type: ResourceType::Clusters,
        poll_interval,
        max_age_ready: StdDuration::from_secs(30 * 60),
        max_age_not_ready: StdDuration::from_secs(10),
        resource_selector: LabelSelector::default(),
        topic: "test-topic".into(),
        hyperfleet_api: HyperfleetApiConfig {
            endpoint: "https://inventory.example.com".into(),
            timeout: StdDuration::from_secs(5),
        },
        message_data: BTreeMap::new(),
    }
}

fn resource(
    id: &str,
    generation: u64,
    observed_generation: u64,
    ready: bool,
    last_updated: DateTime<Utc>,
) -> Resource {
    let now = Utc::now();
    Resource {
        id: ResourceId::new(id),
        href: format!("/clusters/{id}"),
        kind: ResourceType::Clusters,
        generation,
        created_time: now - Duration::hours(1),
        updated_time: now,
        labels: BTreeMap::new(),
        status: Some(ResourceStatus {
            last_updated,
            observed_generation,
            conditions: vec![Condition {
                type_: "Ready".into(),
                status: if ready { ConditionStatus::True } else { ConditionStatus::False },
                last_transition_time: now,
                reason: None,
                message: None,
            }],
        }),
    }
}

struct StubInventoryClient {
    resources: Vec<Resource>,
    calls: AtomicU32,
    fail_first_n: u32,
}

impl StubInventoryClient {
    fn returning(resources: Vec<Resource>) -> Self {
        StubInventoryClient {
            resources,
            calls: AtomicU32::new(0),
            fail_first_n: 0,
        }
    }
}

#[async_trait]
impl InventoryClient for StubInventoryClient {
    async fn fetch(
        &self,
        _token: &CancellationToken,
        _kind: ResourceType,
        _selector: &LabelSelector,
    ) -> Result<Vec<Resource>, InventoryError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first_n {
            return Err(InventoryError::Unavailable("injected failure".into()));
        }
        Ok(self.resources.clone())
    }
}

fn harness(
    config: SentinelConfig,
    inventory: Arc<dyn InventoryClient>,
    publisher: Arc<InMemoryPublisher>,
) -> Sentinel {
    let registry = prometheus::Registry::new();
    let metrics = Arc::new(MetricsRegistry::new(&registry).unwrap());
    let readiness = Arc::new(ReadinessRegistry::new());
    Sentinel::new(config, inventory, publisher, metrics, readiness)
}

#[tokio::test]
async fn scenario_1_age_triggered_publish() {
    let now = Utc::now();
    let r = resource("cluster-1", 2, 2, true, now - Duration::minutes(31));
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient::returning(vec![r]));
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_secs(3600));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    token.cancel();
    sentinel.run(token).await;

    let published = publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "test-topic");
    assert_eq!(published[0].1.type_, "com.redhat.hyperfleet.Cluster.reconcile");
    assert_eq!(published[0].1.data["reason"], "max age exceeded");
    assert_eq!(published[0].1.data["id"], "cluster-1");
}

#[tokio::test]
async fn scenario_2_within_age_skip() {
    let now = Utc::now();
    let r = resource("cluster-2", 2, 2, true, now - Duration::minutes(15));
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient::returning(vec![r]));
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_secs(3600));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    token.cancel();
    sentinel.run(token).await;

    assert!(publisher.published().await.is_empty());
}

#[tokio::test]
async fn scenario_3_generation_triggered_publish() {
    let now = Utc::now();
    let r = resource("cluster-3", 5, 4, true, now - Duration::minutes(1));
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient::returning(vec![r]));
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_secs(3600));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    token.cancel();
    sentinel.run(token).await;

    let published = publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].1.data["reason"], "generation changed");
}

#[tokio::test]
async fn scenario_4_not_ready_short_ceiling() {
    let now = Utc::now();
    let r = resource("cluster-4", 2, 2, false, now - Duration::seconds(11));
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient::returning(vec![r]));
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_secs(3600));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    token.cancel();
    sentinel.run(token).await;

    let published = publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].1.data["reason"], "max age exceeded");
}

#[tokio::test]
async fn scenario_5_fetch_failure_does_not_crash_the_loop() {
    let now = Utc::now();
    let r = resource("cluster-5", 2, 2, true, now - Duration::minutes(31));
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient {
        resources: vec![r],
        calls: AtomicU32::new(0),
        fail_first_n: 1,
    });
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_millis(20));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    let loop_token = token.clone();
    let handle = tokio::spawn(async move { sentinel.run(loop_token).await });

    tokio::time::sleep(StdDuration::from_millis(60)).await;
    token.cancel();
    handle.await.unwrap();

    let published = publisher.published().await;
    assert!(!published.is_empty(), "expected at least one event after recovery");
}

#[tokio::test]
async fn scenario_6_shutdown_closes_publisher_exactly_once() {
    let inventory: Arc<dyn InventoryClient> = Arc::new(StubInventoryClient::returning(vec![]));
    let publisher = Arc::new(InMemoryPublisher::new());
    let config = base_config(StdDuration::from_millis(10));
    let sentinel = harness(config, inventory, publisher.clone());

    let token = CancellationToken::new();
    let loop_token = token.clone();
    let handle = tokio::spawn(async move { sentinel.run(loop_token).await });

    tokio::time::sleep(StdDuration::from_millis(30)).await;
    token.cancel();
    handle.await.unwrap();

    assert_eq!(publisher.close_call_count().await, 1);
}
