//! Wallet Port - Account Access Interface
//!
//! Defines the trait for the external wallet that holds the user's
//! accounts. The wallet grants account access on request and pushes
//! account-change notifications whenever the user switches or locks
//! accounts.

use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

/// Push notification fired when the wallet's exposed accounts change.
///
/// An empty `accounts` list means the wallet was locked or the user
/// revoked access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsChanged {
  /// Exposed accounts, preferred account first.
  pub accounts: Vec<Address>,
}

/// Errors surfaced by a wallet provider.
///
/// A missing wallet is not an error of the provider: it is modelled
/// as the provider being absent altogether.
#[derive(Debug, Error)]
pub enum WalletError {
  /// The user (or the wallet) refused the account request.
  #[error("account request rejected: {0}")]
  Rejected(String),
  /// The requested account is not held by this wallet.
  #[error("account {0} is not managed by this wallet")]
  UnknownAccount(Address),
}

/// Trait for external wallet providers.
///
/// Implementors expose account access and an account-change event
/// stream. Signing stays inside the wallet adapter; the contract
/// binder asks it for a signer by account.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
  /// Request access to the wallet's accounts.
  ///
  /// Returns the exposed accounts, preferred account first. An empty
  /// list is a valid answer (nothing to connect).
  async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

  /// Subscribe to account-change notifications.
  ///
  /// Dropping the receiver unsubscribes.
  fn subscribe(&self) -> broadcast::Receiver<AccountsChanged>;
}
