use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

/// A named dependency check, evaluated on demand by `/readyz`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    /// Process is not ready yet (or shutting down); probes were not run.
    Unavailable,
    Error(String),
}

/// Binary readiness flag plus a set of named probes. Probes are not cached:
/// each `/readyz` hit re-runs them, keeping the registry itself trivial.
pub struct ReadinessRegistry {
    ready: Arc<AtomicBool>,
    probes: Arc<RwLock<HashMap<String, Arc<dyn Probe>>>>,
}

impl ReadinessRegistry {
    pub fn new() -> Self {
        ReadinessRegistry {
            ready: Arc::new(AtomicBool::new(false)),
            probes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub async fn register_probe(&self, name: impl Into<String>, probe: Arc<dyn Probe>) {
        self.probes.write().await.insert(name.into(), probe);
    }

    /// Evaluate overall readiness. While `ready == false` probes are not
    /// executed at all and are reported `Unavailable` — shutdown stays fast.
    pub async fn evaluate(&self) -> HashMap<String, ProbeStatus> {
        let probes = self.probes.read().await;
        if !self.is_ready() {
            return probes
                .keys()
                .map(|name| (name.clone(), ProbeStatus::Unavailable))
                .collect();
        }

        let mut results = HashMap::with_capacity(probes.len());
        for (name, probe) in probes.iter() {
            let status = match probe.check().await {
                Ok(()) => ProbeStatus::Ok,
                Err(message) => {
                    warn!(probe = name.as_str(), error = %message, "readiness probe failed");
                    ProbeStatus::Error(message)
                }
            };
            results.insert(name.clone(), status);
        }
        results
    }
}

impl Default for ReadinessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
