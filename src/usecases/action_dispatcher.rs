//! Action Dispatcher - Marketplace Contract Actions
//!
//! Every action follows the same three phases:
//! 1. Precondition: a contract handle must be bound, otherwise the
//!    action is a silent no-op.
//! 2. Submit: decimal prices are converted to wei, ids parsed, and the
//!    remote call issued.
//! 3. Finalize: wait for the inclusion receipt, then notify success.
//!
//! Any failure in phases 2–3 is logged and reported as one generic
//! error notification. Nothing is retried and nothing local is
//! mutated speculatively, so there is nothing to roll back.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{TxHash, U256};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::domain::amount::{parse_ether, AmountError};
use crate::domain::dataset::{parse_dataset_id, DatasetIdError, DatasetView};
use crate::ports::marketplace::{CallReceipt, MarketplaceContract, PendingCall};
use crate::ports::notifier::{Notification, Notifier};

use super::session_manager::SessionManager;

/// A user request, carrying the raw form values it was submitted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Upload { ipfs_hash: String, price: String },
  Buy { dataset_id: String },
  UpdatePrice { dataset_id: String, new_price: String },
  ListForSale { dataset_id: String, price: String },
  GetDataset { dataset_id: String },
  DatasetCount,
}

/// Action discriminant, used for messages and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
  Upload,
  Buy,
  UpdatePrice,
  ListForSale,
  GetDataset,
  DatasetCount,
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  /// No contract handle was bound; nothing happened.
  Skipped,
  /// A state-changing call was included.
  Confirmed(CallReceipt),
  /// A dataset record was read and displayed.
  Displayed(DatasetView),
  /// The dataset count was read.
  Counted(U256),
  /// The action failed and one error notification was shown.
  Failed,
}

/// Everything that can go wrong once an action passed its precondition.
///
/// The user only ever sees a generic message; the variant is logged.
#[derive(Debug, Error)]
pub enum ActionError {
  #[error("IPFS hash is empty")]
  EmptyIpfsHash,
  #[error("invalid amount: {0}")]
  Amount(#[from] AmountError),
  #[error("invalid dataset id: {0}")]
  DatasetId(#[from] DatasetIdError),
  #[error("transaction {0} reverted")]
  Reverted(TxHash),
  #[error(transparent)]
  Remote(#[from] anyhow::Error),
}

impl Action {
  pub const fn kind(&self) -> ActionKind {
    match self {
      Self::Upload { .. } => ActionKind::Upload,
      Self::Buy { .. } => ActionKind::Buy,
      Self::UpdatePrice { .. } => ActionKind::UpdatePrice,
      Self::ListForSale { .. } => ActionKind::ListForSale,
      Self::GetDataset { .. } => ActionKind::GetDataset,
      Self::DatasetCount => ActionKind::DatasetCount,
    }
  }
}

impl ActionKind {
  /// Stable snake_case name.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Upload => "upload",
      Self::Buy => "buy",
      Self::UpdatePrice => "update_price",
      Self::ListForSale => "list_for_sale",
      Self::GetDataset => "get_dataset",
      Self::DatasetCount => "dataset_count",
    }
  }

  const fn success_message(self) -> &'static str {
    match self {
      Self::Upload => "Dataset uploaded successfully!",
      Self::Buy => "Dataset purchased successfully!",
      Self::UpdatePrice => "Price updated successfully!",
      Self::ListForSale => "Dataset listed for sale successfully!",
      Self::GetDataset | Self::DatasetCount => "",
    }
  }

  const fn failure_message(self) -> &'static str {
    match self {
      Self::Upload => "Error uploading dataset",
      Self::Buy => "Error buying dataset",
      Self::UpdatePrice => "Error updating price",
      Self::ListForSale => "Error listing dataset for sale",
      Self::GetDataset => "Error getting dataset",
      Self::DatasetCount => "Error getting dataset count",
    }
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl ActionOutcome {
  /// Metric label for the outcome.
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Skipped => "skipped",
      Self::Confirmed(_) | Self::Displayed(_) | Self::Counted(_) => "success",
      Self::Failed => "failure",
    }
  }
}

/// Runs actions against the session's current contract handle.
pub struct ActionDispatcher {
  notifier: Arc<dyn Notifier>,
  /// Suffix for displayed prices.
  currency_symbol: String,
}

impl ActionDispatcher {
  pub fn new(notifier: Arc<dyn Notifier>, currency_symbol: impl Into<String>) -> Self {
    Self {
      notifier,
      currency_symbol: currency_symbol.into(),
    }
  }

  /// Run `action` against the session's current binding.
  ///
  /// The handle is captured once; a session change while the action
  /// is in flight does not affect it.
  #[instrument(skip(self, session), fields(action = %action.kind()))]
  pub async fn dispatch(&self, session: &SessionManager, action: &Action) -> ActionOutcome {
    let Some(contract) = session.current_contract().await else {
      debug!("No active contract binding, ignoring action");
      return ActionOutcome::Skipped;
    };

    let kind = action.kind();
    let result = match action {
      Action::Upload { ipfs_hash, price } => self
        .upload(contract.as_ref(), ipfs_hash, price)
        .await
        .map(ActionOutcome::Confirmed),
      Action::Buy { dataset_id } => self
        .buy(contract.as_ref(), dataset_id)
        .await
        .map(ActionOutcome::Confirmed),
      Action::UpdatePrice {
        dataset_id,
        new_price,
      } => self
        .update_price(contract.as_ref(), dataset_id, new_price)
        .await
        .map(ActionOutcome::Confirmed),
      Action::ListForSale { dataset_id, price } => self
        .list_for_sale(contract.as_ref(), dataset_id, price)
        .await
        .map(ActionOutcome::Confirmed),
      Action::GetDataset { dataset_id } => self
        .get_dataset(contract.as_ref(), dataset_id)
        .await
        .map(ActionOutcome::Displayed),
      Action::DatasetCount => contract
        .dataset_count()
        .await
        .map(ActionOutcome::Counted)
        .map_err(ActionError::from),
    };

    match result {
      Ok(outcome) => {
        self.report_success(kind, &outcome);
        outcome
      }
      Err(e) => {
        error!(action = %kind, error = %e, "{}", kind.failure_message());
        self
          .notifier
          .notify(Notification::Error(kind.failure_message().to_string()));
        ActionOutcome::Failed
      }
    }
  }

  /// Submit a new dataset at `ipfs_hash` priced at `price` ether.
  async fn upload(
    &self,
    contract: &dyn MarketplaceContract,
    ipfs_hash: &str,
    price: &str,
  ) -> Result<CallReceipt, ActionError> {
    let ipfs_hash = ipfs_hash.trim();
    if ipfs_hash.is_empty() {
      return Err(ActionError::EmptyIpfsHash);
    }
    let price = parse_ether(price)?;

    let pending = contract.upload_dataset(ipfs_hash, price).await?;
    finalize(pending).await
  }

  /// Read the dataset's current price, then pay exactly that price.
  ///
  /// The price can change between the read and the purchase; the
  /// contract decides the outcome and the client does not re-check.
  async fn buy(
    &self,
    contract: &dyn MarketplaceContract,
    dataset_id: &str,
  ) -> Result<CallReceipt, ActionError> {
    let id = parse_dataset_id(dataset_id)?;

    let dataset = contract.get_dataset(id).await?;
    debug!(dataset_id = %id, price = %dataset.price, "Paying listed price");

    let pending = contract.buy_dataset(id, dataset.price).await?;
    finalize(pending).await
  }

  async fn update_price(
    &self,
    contract: &dyn MarketplaceContract,
    dataset_id: &str,
    new_price: &str,
  ) -> Result<CallReceipt, ActionError> {
    let id = parse_dataset_id(dataset_id)?;
    let price = parse_ether(new_price)?;

    let pending = contract.update_price(id, price).await?;
    finalize(pending).await
  }

  async fn list_for_sale(
    &self,
    contract: &dyn MarketplaceContract,
    dataset_id: &str,
    price: &str,
  ) -> Result<CallReceipt, ActionError> {
    let id = parse_dataset_id(dataset_id)?;
    let price = parse_ether(price)?;

    let pending = contract.list_dataset_for_sale(id, price).await?;
    finalize(pending).await
  }

  async fn get_dataset(
    &self,
    contract: &dyn MarketplaceContract,
    dataset_id: &str,
  ) -> Result<DatasetView, ActionError> {
    let id = parse_dataset_id(dataset_id)?;
    let dataset = contract.get_dataset(id).await?;
    Ok(DatasetView::new(&dataset, &self.currency_symbol))
  }

  fn report_success(&self, kind: ActionKind, outcome: &ActionOutcome) {
    match outcome {
      ActionOutcome::Confirmed(receipt) => {
        info!(
          action = %kind,
          tx_hash = %receipt.tx_hash,
          block = ?receipt.block_number,
          gas_used = receipt.gas_used,
          "Transaction confirmed"
        );
        self
          .notifier
          .notify(Notification::Success(kind.success_message().to_string()));
      }
      ActionOutcome::Displayed(view) => {
        self.notifier.notify(Notification::Dataset(view.clone()));
      }
      ActionOutcome::Counted(count) => {
        self
          .notifier
          .notify(Notification::Info(format!("Dataset count: {count}")));
      }
      ActionOutcome::Skipped | ActionOutcome::Failed => {}
    }
  }
}

/// Wait for inclusion and turn a reverted receipt into an error.
async fn finalize(pending: PendingCall) -> Result<CallReceipt, ActionError> {
  let tx_hash = pending.tx_hash();
  debug!(tx_hash = %tx_hash, "Awaiting inclusion");

  let receipt = pending.finalize().await?;
  if !receipt.success {
    return Err(ActionError::Reverted(tx_hash));
  }
  Ok(receipt)
}
