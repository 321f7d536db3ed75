//! Chain Adapters - Marketplace Contract Interaction Layer
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - Signing RPC provider per session account, with chain-id check
//! - The dataset marketplace contract (`sol!` binding)
//! - The `ContractBinder` that ties both to the local wallet

pub mod binder;
pub mod contracts;
pub mod provider;

pub use binder::{AlloyContractBinder, UnavailableBinder};
pub use contracts::DatasetMarketplace;
pub use provider::{build_http_provider, HttpTransport, SigningProvider};
