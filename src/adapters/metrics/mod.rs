//! Metrics Adapters
//!
//! Prometheus counters for marketplace actions and session state,
//! rendered by the terminal `metrics` command.

pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
