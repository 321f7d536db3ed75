//! Wallet Adapters - Account Access
//!
//! `LocalWallet` implements the `WalletProvider` port over private keys
//! supplied through the environment.

pub mod local;

pub use local::LocalWallet;
