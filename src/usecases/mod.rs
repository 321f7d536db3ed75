//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the client's workflows.
//!
//! Use cases:
//! - `SessionManager`: Wallet session lifecycle and contract binding
//! - `ActionDispatcher`: The five marketplace actions plus the count read
//! - `MarketplaceClient`: Front-end controller owning form state

pub mod action_dispatcher;
pub mod client;
pub mod session_manager;

pub use action_dispatcher::{Action, ActionDispatcher, ActionError, ActionKind, ActionOutcome};
pub use client::MarketplaceClient;
pub use session_manager::{AccountListener, ConnectOutcome, SessionManager};
