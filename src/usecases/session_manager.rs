//! Session Manager - Wallet Session Lifecycle
//!
//! Owns the single wallet session and the contract handle bound to
//! it. The handle is rebuilt whenever the session account changes and
//! dropped when the session is cleared; it is replaced, never mutated,
//! so in-flight actions keep the handle they started with.
//!
//! Account-change notifications are consumed by a listener task whose
//! lifetime is tied to an [`AccountListener`] guard. Session changes
//! are published on a `watch` channel for observers such as metrics.

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::session::{short_address, Session};
use crate::ports::marketplace::{ContractBinder, MarketplaceContract};
use crate::ports::notifier::{Notification, Notifier};
use crate::ports::wallet::{AccountsChanged, WalletProvider};

/// Session plus the contract handle bound to it.
#[derive(Default)]
struct SessionState {
  session: Session,
  contract: Option<Arc<dyn MarketplaceContract>>,
}

/// Result of a [`SessionManager::connect`] attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
  /// Session established and contract bound.
  Connected(Address),
  /// The wallet exposed no accounts; the session is cleared.
  NoAccounts,
  /// No wallet is installed.
  WalletUnavailable,
  /// Account request or binding failed.
  Failed,
}

/// Tracks the connected account and its contract binding.
pub struct SessionManager {
  /// `None` when no wallet is installed.
  wallet: Option<Arc<dyn WalletProvider>>,
  binder: Arc<dyn ContractBinder>,
  notifier: Arc<dyn Notifier>,
  state: RwLock<SessionState>,
  /// Latest session, for observers.
  session_tx: watch::Sender<Session>,
}

impl SessionManager {
  /// Create a manager with no active session.
  pub fn new(
    wallet: Option<Arc<dyn WalletProvider>>,
    binder: Arc<dyn ContractBinder>,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    Self {
      wallet,
      binder,
      notifier,
      state: RwLock::new(SessionState::default()),
      session_tx: watch::Sender::new(Session::default()),
    }
  }

  /// Request account access and bind the contract for the first account.
  ///
  /// Concurrent calls are not coordinated; the last one to finish wins.
  #[instrument(skip(self))]
  pub async fn connect(&self) -> ConnectOutcome {
    let Some(wallet) = self.wallet.as_ref() else {
      warn!("Connect requested but no wallet is installed");
      self.notifier.notify(Notification::WalletUnavailable);
      return ConnectOutcome::WalletUnavailable;
    };

    let accounts = match wallet.request_accounts().await {
      Ok(accounts) => accounts,
      Err(e) => {
        error!(error = %e, "Failed to connect wallet");
        self
          .notifier
          .notify(Notification::Error("Failed to connect wallet".to_string()));
        return ConnectOutcome::Failed;
      }
    };

    let Some(&account) = accounts.first() else {
      info!("Wallet exposed no accounts");
      self.clear().await;
      self
        .notifier
        .notify(Notification::Info("No accounts available in wallet".to_string()));
      return ConnectOutcome::NoAccounts;
    };

    match self.binder.bind(account).await {
      Ok(contract) => {
        self.install(account, contract).await;
        info!(account = %account, "Wallet connected");
        ConnectOutcome::Connected(account)
      }
      Err(e) => {
        error!(account = %account, error = %e, "Failed to connect wallet");
        self
          .notifier
          .notify(Notification::Error("Failed to connect wallet".to_string()));
        ConnectOutcome::Failed
      }
    }
  }

  /// React to an account-change notification.
  ///
  /// A non-empty list moves an existing session to its first account
  /// and rebinds the contract; an empty list clears the session.
  /// Without an existing session, non-empty notifications are ignored:
  /// access is only granted through [`connect`](Self::connect).
  #[instrument(skip(self), fields(accounts = event.accounts.len()))]
  pub async fn handle_accounts_changed(&self, event: AccountsChanged) {
    let Some(&account) = event.accounts.first() else {
      if self.session().await.is_connected() {
        info!("Wallet reported no accounts, clearing session");
        self.clear().await;
        self
          .notifier
          .notify(Notification::Info("Wallet disconnected".to_string()));
      }
      return;
    };

    let current = self.session().await.connected_address;
    match current {
      None => {
        debug!(account = %account, "Account change without a session, ignoring");
      }
      Some(existing) if existing == account => {
        debug!(account = %account, "Account unchanged");
      }
      Some(_) => match self.binder.bind(account).await {
        Ok(contract) => {
          self.install(account, contract).await;
          info!(account = %account, "Switched session account");
          self.notifier.notify(Notification::Info(format!(
            "Switched to {}",
            short_address(&account)
          )));
        }
        Err(e) => {
          // The old handle signs for the wrong account now; drop it.
          error!(account = %account, error = %e, "Failed to rebind after account change");
          self.clear().await;
          self
            .notifier
            .notify(Notification::Error("Failed to connect wallet".to_string()));
        }
      },
    }
  }

  /// Current session snapshot.
  pub async fn session(&self) -> Session {
    self.state.read().await.session
  }

  /// Current contract handle, if a session is bound.
  pub async fn current_contract(&self) -> Option<Arc<dyn MarketplaceContract>> {
    self.state.read().await.contract.clone()
  }

  /// Observe session changes. Only real changes wake the receiver.
  pub fn watch_session(&self) -> watch::Receiver<Session> {
    self.session_tx.subscribe()
  }

  /// Start consuming account-change notifications.
  ///
  /// Returns `None` when no wallet is installed. The subscription is
  /// taken before the task is spawned so no notification fired after
  /// this call is missed.
  pub fn spawn_listener(self: &Arc<Self>) -> Option<AccountListener> {
    let wallet = self.wallet.as_ref()?;
    let mut rx = wallet.subscribe();
    let manager = Arc::clone(self);

    let handle = tokio::spawn(async move {
      info!("Account listener started");
      loop {
        match rx.recv().await {
          Ok(event) => manager.handle_accounts_changed(event).await,
          Err(broadcast::error::RecvError::Lagged(skipped)) => {
            warn!(skipped, "Account listener lagged, dropped notifications");
          }
          Err(broadcast::error::RecvError::Closed) => {
            info!("Wallet closed the account channel");
            break;
          }
        }
      }
    });

    Some(AccountListener { handle })
  }

  async fn install(&self, account: Address, contract: Arc<dyn MarketplaceContract>) {
    let mut state = self.state.write().await;
    state.session = Session::connected(account);
    state.contract = Some(contract);
    self.publish(state.session);
  }

  async fn clear(&self) {
    let mut state = self.state.write().await;
    state.session = Session::default();
    state.contract = None;
    self.publish(state.session);
  }

  fn publish(&self, session: Session) {
    self.session_tx.send_if_modified(|current| {
      let changed = *current != session;
      *current = session;
      changed
    });
  }
}

/// Guard for the account-change subscription.
///
/// Dropping it (or calling [`unsubscribe`](Self::unsubscribe)) stops
/// the listener task and releases the subscription.
#[derive(Debug)]
pub struct AccountListener {
  handle: JoinHandle<()>,
}

impl AccountListener {
  /// Stop listening for account changes.
  pub fn unsubscribe(self) {
    drop(self);
  }

  /// Whether the listener task is still running.
  pub fn is_active(&self) -> bool {
    !self.handle.is_finished()
  }
}

impl Drop for AccountListener {
  fn drop(&mut self) {
    self.handle.abort();
    debug!("Account listener unsubscribed");
  }
}
