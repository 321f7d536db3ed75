//! Prometheus Metrics Registry - Client Observability
//!
//! Counts actions by kind and outcome and tracks whether a session is
//! connected. Rendered on demand in the text exposition format.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::session::Session;
use crate::usecases::action_dispatcher::{ActionKind, ActionOutcome};

/// Centralized Prometheus metrics for the marketplace client.
///
/// All metrics follow the naming convention `dataset_marketplace_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Actions by kind and outcome (success / failure / skipped).
    pub actions: IntCounterVec,
    /// Session status (1 = connected, 0 = disconnected).
    pub session_connected: IntGauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let actions = IntCounterVec::new(
            Opts::new(
                "dataset_marketplace_actions_total",
                "Marketplace actions by kind and outcome",
            ),
            &["action", "outcome"],
        )?;

        let session_connected = IntGauge::new(
            "dataset_marketplace_session_connected",
            "Wallet session status (1=connected, 0=disconnected)",
        )?;

        registry.register(Box::new(actions.clone()))?;
        registry.register(Box::new(session_connected.clone()))?;

        Ok(Self {
            registry,
            actions,
            session_connected,
        })
    }

    /// Record the outcome of one action.
    pub fn record_action(&self, kind: ActionKind, outcome: &ActionOutcome) {
        self.actions
            .with_label_values(&[kind.as_str(), outcome.label()])
            .inc();
    }

    pub fn set_connected(&self, connected: bool) {
        self.session_connected.set(i64::from(connected));
    }

    /// Keep the session gauge in step with `sessions` until the
    /// session source goes away or the task is aborted.
    pub fn track_session(self: &Arc<Self>, mut sessions: watch::Receiver<Session>) -> JoinHandle<()> {
        let metrics = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let connected = sessions.borrow_and_update().is_connected();
                metrics.set_connected(connected);
                if sessions.changed().await.is_err() {
                    debug!("Session source closed, gauge tracking stopped");
                    break;
                }
            }
        })
    }

    /// Encode all metrics in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
