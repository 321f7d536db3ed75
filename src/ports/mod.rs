//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `WalletProvider`: Account access and account-change events
//! - `ContractBinder` / `MarketplaceContract`: Bound contract calls
//! - `Notifier`: User-visible success/failure feedback

pub mod marketplace;
pub mod notifier;
pub mod wallet;
