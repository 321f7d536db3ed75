//! Marketplace Client - Front-end Controller
//!
//! Owns the view state of one front-end: the session manager, the
//! action dispatcher and the form fields. Front-ends edit the form,
//! then submit an action built from a snapshot of it. Each submitted
//! action runs as its own task so the front-end stays responsive.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::form::{FormField, FormState};
use crate::domain::session::Session;

use super::action_dispatcher::{Action, ActionDispatcher, ActionKind, ActionOutcome};
use super::session_manager::{AccountListener, ConnectOutcome, SessionManager};

/// Controller tying the session, the dispatcher and the form together.
pub struct MarketplaceClient {
  session: Arc<SessionManager>,
  dispatcher: Arc<ActionDispatcher>,
  form: FormState,
  /// Held for the client's lifetime; dropping it unsubscribes.
  listener: Option<AccountListener>,
}

impl MarketplaceClient {
  /// Create the client and subscribe to account changes.
  ///
  /// Must be called inside a tokio runtime.
  pub fn new(session: Arc<SessionManager>, dispatcher: Arc<ActionDispatcher>) -> Self {
    let listener = session.spawn_listener();
    Self {
      session,
      dispatcher,
      form: FormState::default(),
      listener,
    }
  }

  pub async fn connect(&self) -> ConnectOutcome {
    self.session.connect().await
  }

  /// Run `connect` as an independent task.
  pub fn spawn_connect(&self) -> JoinHandle<ConnectOutcome> {
    let session = Arc::clone(&self.session);
    tokio::spawn(async move { session.connect().await })
  }

  /// Observe session changes.
  pub fn watch_session(&self) -> watch::Receiver<Session> {
    self.session.watch_session()
  }

  pub async fn session(&self) -> Session {
    self.session.session().await
  }

  pub fn form(&self) -> &FormState {
    &self.form
  }

  pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
    self.form.set(field, value);
  }

  pub fn form_mut(&mut self) -> &mut FormState {
    &mut self.form
  }

  /// Build `kind` from the current form contents.
  pub fn action_from_form(&self, kind: ActionKind) -> Action {
    let form = &self.form;
    match kind {
      ActionKind::Upload => Action::Upload {
        ipfs_hash: form.ipfs_hash.clone(),
        price: form.price.clone(),
      },
      ActionKind::Buy => Action::Buy {
        dataset_id: form.dataset_id.clone(),
      },
      ActionKind::UpdatePrice => Action::UpdatePrice {
        dataset_id: form.dataset_id.clone(),
        new_price: form.new_price.clone(),
      },
      ActionKind::ListForSale => Action::ListForSale {
        dataset_id: form.dataset_id.clone(),
        price: form.price.clone(),
      },
      ActionKind::GetDataset => Action::GetDataset {
        dataset_id: form.dataset_id.clone(),
      },
      ActionKind::DatasetCount => Action::DatasetCount,
    }
  }

  /// Run `action` to completion on the current task.
  pub async fn dispatch(&self, action: &Action) -> ActionOutcome {
    self.dispatcher.dispatch(&self.session, action).await
  }

  /// Run `kind` built from the form as an independent task.
  ///
  /// Nothing stops two submissions for the same dataset from running
  /// concurrently; the contract orders them.
  pub fn submit(&self, kind: ActionKind) -> JoinHandle<ActionOutcome> {
    let action = self.action_from_form(kind);
    let session = Arc::clone(&self.session);
    let dispatcher = Arc::clone(&self.dispatcher);
    tokio::spawn(async move { dispatcher.dispatch(&session, &action).await })
  }

  /// Whether the account-change subscription is live.
  pub fn is_listening(&self) -> bool {
    self.listener.as_ref().is_some_and(AccountListener::is_active)
  }

  /// Drop the account-change subscription.
  pub fn shutdown(&mut self) {
    if let Some(listener) = self.listener.take() {
      listener.unsubscribe();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ports::marketplace::{ContractBinder, MarketplaceContract};
  use crate::ports::notifier::{Notification, Notifier};
  use alloy::primitives::Address;

  struct NoBinder;

  #[async_trait::async_trait]
  impl ContractBinder for NoBinder {
    async fn bind(&self, _account: Address) -> anyhow::Result<Arc<dyn MarketplaceContract>> {
      anyhow::bail!("unbound")
    }
  }

  struct Silent;

  impl Notifier for Silent {
    fn notify(&self, _notification: Notification) {}
  }

  fn client() -> MarketplaceClient {
    let session = Arc::new(SessionManager::new(None, Arc::new(NoBinder), Arc::new(Silent)));
    let dispatcher = Arc::new(ActionDispatcher::new(Arc::new(Silent), "ETH"));
    MarketplaceClient::new(session, dispatcher)
  }

  #[test]
  fn test_actions_snapshot_form_fields() {
    let mut client = client();
    client.set_field(FormField::IpfsHash, "QmHash");
    client.set_field(FormField::Price, "1.5");
    client.set_field(FormField::DatasetId, "3");
    client.set_field(FormField::NewPrice, "2");

    assert_eq!(
      client.action_from_form(ActionKind::Upload),
      Action::Upload {
        ipfs_hash: "QmHash".to_string(),
        price: "1.5".to_string(),
      }
    );
    assert_eq!(
      client.action_from_form(ActionKind::UpdatePrice),
      Action::UpdatePrice {
        dataset_id: "3".to_string(),
        new_price: "2".to_string(),
      }
    );
    assert_eq!(
      client.action_from_form(ActionKind::ListForSale),
      Action::ListForSale {
        dataset_id: "3".to_string(),
        price: "1.5".to_string(),
      }
    );
  }

  #[test]
  fn test_no_wallet_means_no_listener() {
    let mut client = client();
    assert!(!client.is_listening());
    client.shutdown();
    assert!(!client.is_listening());
  }

  #[test]
  fn test_dispatch_without_session_is_skipped() {
    let client = client();
    let outcome = tokio_test::block_on(client.dispatch(&Action::DatasetCount));
    assert_eq!(outcome, ActionOutcome::Skipped);
  }
}
