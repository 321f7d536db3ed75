//! Marketplace Contract Port - Remote Contract Interface
//!
//! Defines the bound contract handle used by the action dispatcher
//! and the binder that produces it for a connected account.
//!
//! State-changing calls are split into two phases: `submit` returns a
//! [`PendingCall`] as soon as the transaction is accepted by the node,
//! and [`PendingCall::finalize`] waits for its inclusion receipt.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::domain::dataset::Dataset;

/// Inclusion receipt of a finalized call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt {
  /// Transaction hash.
  pub tx_hash: TxHash,
  /// Block the transaction was included in.
  pub block_number: Option<u64>,
  /// Gas consumed.
  pub gas_used: u64,
  /// `false` when the contract reverted.
  pub success: bool,
}

/// A submitted call awaiting inclusion.
pub struct PendingCall {
  tx_hash: TxHash,
  confirmation: BoxFuture<'static, anyhow::Result<CallReceipt>>,
}

impl PendingCall {
  /// Wrap a submitted transaction and the future resolving its receipt.
  pub fn new(
    tx_hash: TxHash,
    confirmation: BoxFuture<'static, anyhow::Result<CallReceipt>>,
  ) -> Self {
    Self {
      tx_hash,
      confirmation,
    }
  }

  /// A call whose receipt is already known.
  pub fn confirmed(receipt: CallReceipt) -> Self {
    let tx_hash = receipt.tx_hash;
    Self::new(tx_hash, async move { Ok(receipt) }.boxed())
  }

  /// Hash of the submitted transaction.
  pub const fn tx_hash(&self) -> TxHash {
    self.tx_hash
  }

  /// Wait until the transaction is included.
  ///
  /// There is no client-side timeout: a transaction that never lands
  /// keeps this future pending.
  pub async fn finalize(self) -> anyhow::Result<CallReceipt> {
    self.confirmation.await
  }
}

impl fmt::Debug for PendingCall {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PendingCall")
      .field("tx_hash", &self.tx_hash)
      .finish_non_exhaustive()
  }
}

/// Handle to the marketplace contract, bound to one network, one
/// contract address and one signing account.
///
/// Handles are immutable; a session change builds a new one.
#[async_trait]
pub trait MarketplaceContract: Send + Sync + 'static {
  /// Contract address this handle targets.
  fn address(&self) -> Address;

  /// Account that signs submissions.
  fn account(&self) -> Address;

  /// `uploadDataset(ipfsHash, price)`.
  async fn upload_dataset(&self, ipfs_hash: &str, price: U256) -> anyhow::Result<PendingCall>;

  /// `getDataset(id)`, read-only.
  async fn get_dataset(&self, dataset_id: U256) -> anyhow::Result<Dataset>;

  /// `buyDataset(id)` with `payment` wei attached.
  async fn buy_dataset(&self, dataset_id: U256, payment: U256) -> anyhow::Result<PendingCall>;

  /// `updatePrice(id, newPrice)`. Ownership is enforced by the contract.
  async fn update_price(&self, dataset_id: U256, new_price: U256) -> anyhow::Result<PendingCall>;

  /// `listDatasetForSale(id, price)`.
  async fn list_dataset_for_sale(
    &self,
    dataset_id: U256,
    price: U256,
  ) -> anyhow::Result<PendingCall>;

  /// `datasetCount()`, read-only.
  async fn dataset_count(&self) -> anyhow::Result<U256>;
}

/// Builds contract handles for a connected account.
#[async_trait]
pub trait ContractBinder: Send + Sync + 'static {
  /// Bind the contract for `account` on the configured network.
  async fn bind(&self, account: Address) -> anyhow::Result<Arc<dyn MarketplaceContract>>;
}
