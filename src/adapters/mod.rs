//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (blockchain RPC, local keys, stdin/stdout).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `chain`: Marketplace contract interaction via alloy-rs
//! - `metrics`: Prometheus action counters
//! - `terminal`: Interactive console front-end and notifier
//! - `wallet`: Local private-key wallet

pub mod chain;
pub mod metrics;
pub mod terminal;
pub mod wallet;
