//! Local Key Wallet - In-process Wallet Provider
//!
//! Holds alloy `PrivateKeySigner`s loaded from an environment
//! variable and behaves like a browser wallet extension: access is
//! granted on request, the selected account is reported first, and
//! switching or locking fires an account-change notification.

use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use crate::ports::wallet::{AccountsChanged, WalletError, WalletProvider};

/// Capacity of the account-change channel.
const EVENT_CAPACITY: usize = 16;

#[derive(Debug)]
struct WalletState {
    /// Index into `signers` of the preferred account.
    selected: usize,
    /// Whether access has been granted since the last lock.
    unlocked: bool,
}

/// Wallet backed by private keys held in memory.
pub struct LocalWallet {
    signers: Vec<PrivateKeySigner>,
    state: Mutex<WalletState>,
    events: broadcast::Sender<AccountsChanged>,
}

impl LocalWallet {
    /// Create a wallet over `signers`; the first one is selected.
    pub fn new(signers: Vec<PrivateKeySigner>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            signers,
            state: Mutex::new(WalletState {
                selected: 0,
                unlocked: false,
            }),
            events,
        }
    }

    /// Parse comma-separated hex private keys (with or without `0x`).
    pub fn from_keys(keys: &str) -> Result<Self> {
        let signers = keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .enumerate()
            .map(|(i, k)| {
                k.parse::<PrivateKeySigner>()
                    .with_context(|| format!("Invalid private key at position {i}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(signers))
    }

    /// Load keys from environment variable `var`.
    ///
    /// Returns `Ok(None)` when the variable is unset or empty: no
    /// wallet is installed.
    pub fn from_env(var: &str) -> Result<Option<Self>> {
        let Ok(keys) = std::env::var(var) else {
            return Ok(None);
        };
        if keys.trim().is_empty() {
            return Ok(None);
        }

        let wallet = Self::from_keys(&keys)
            .with_context(|| format!("Failed to load wallet keys from {var}"))?;
        info!(accounts = wallet.signers.len(), "Local wallet loaded");
        Ok(Some(wallet))
    }

    /// All accounts held, in key order.
    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    /// Signer for `account`.
    pub fn signer_for(&self, account: Address) -> Result<PrivateKeySigner, WalletError> {
        self.signers
            .iter()
            .find(|s| s.address() == account)
            .cloned()
            .ok_or(WalletError::UnknownAccount(account))
    }

    /// Make `account` the preferred account.
    ///
    /// Fires an account-change notification if access is granted.
    #[instrument(skip(self))]
    pub fn select_account(&self, account: Address) -> Result<(), WalletError> {
        let index = self
            .signers
            .iter()
            .position(|s| s.address() == account)
            .ok_or(WalletError::UnknownAccount(account))?;

        let event = {
            let mut state = self.lock_state();
            state.selected = index;
            state.unlocked.then(|| self.ordered_accounts(index))
        };

        if let Some(accounts) = event {
            self.emit(accounts);
        }
        Ok(())
    }

    /// Revoke access; fires an empty account-change notification.
    #[instrument(skip(self))]
    pub fn lock(&self) {
        self.lock_state().unlocked = false;
        self.emit(Vec::new());
    }

    /// Whether access is currently granted.
    pub fn is_unlocked(&self) -> bool {
        self.lock_state().unlocked
    }

    /// Accounts with the selected one first.
    fn ordered_accounts(&self, selected: usize) -> Vec<Address> {
        let mut accounts = Vec::with_capacity(self.signers.len());
        if let Some(s) = self.signers.get(selected) {
            accounts.push(s.address());
        }
        accounts.extend(
            self.signers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != selected)
                .map(|(_, s)| s.address()),
        );
        accounts
    }

    fn emit(&self, accounts: Vec<Address>) {
        let count = accounts.len();
        if self.events.send(AccountsChanged { accounts }).is_err() {
            debug!("No account-change subscribers");
        } else {
            debug!(accounts = count, "Account change emitted");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, WalletState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let selected = {
            let mut state = self.lock_state();
            state.unlocked = true;
            state.selected
        };
        Ok(self.ordered_accounts(selected))
    }

    fn subscribe(&self) -> broadcast::Receiver<AccountsChanged> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_B: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const ADDR_A: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const ADDR_B: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

    fn wallet() -> LocalWallet {
        LocalWallet::from_keys(&format!("{KEY_A}, {KEY_B}")).unwrap()
    }

    #[test]
    fn test_from_keys_derives_addresses() {
        assert_eq!(wallet().addresses(), vec![ADDR_A, ADDR_B]);
    }

    #[test]
    fn test_from_keys_rejects_garbage() {
        assert!(LocalWallet::from_keys("not-a-key").is_err());
    }

    #[test]
    fn test_from_env_unset_means_no_wallet() {
        let wallet = LocalWallet::from_env("DATASET_MARKETPLACE_TEST_UNSET_VAR").unwrap();
        assert!(wallet.is_none());
    }

    #[tokio::test]
    async fn test_request_accounts_puts_selected_first() {
        let wallet = wallet();
        wallet.select_account(ADDR_B).unwrap();

        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![ADDR_B, ADDR_A]);
        assert!(wallet.is_unlocked());
    }

    #[tokio::test]
    async fn test_select_emits_only_when_unlocked() {
        let wallet = wallet();
        let mut rx = wallet.subscribe();

        wallet.select_account(ADDR_B).unwrap();
        assert!(rx.try_recv().is_err());

        wallet.request_accounts().await.unwrap();
        wallet.select_account(ADDR_A).unwrap();
        assert_eq!(rx.try_recv().unwrap().accounts, vec![ADDR_A, ADDR_B]);
    }

    #[tokio::test]
    async fn test_lock_emits_empty_list() {
        let wallet = wallet();
        let mut rx = wallet.subscribe();
        wallet.request_accounts().await.unwrap();

        wallet.lock();
        assert!(rx.try_recv().unwrap().accounts.is_empty());
        assert!(!wallet.is_unlocked());
    }

    #[test]
    fn test_unknown_account() {
        let wallet = LocalWallet::from_keys(KEY_A).unwrap();
        assert!(matches!(
            wallet.select_account(ADDR_B),
            Err(WalletError::UnknownAccount(a)) if a == ADDR_B
        ));
        assert!(wallet.signer_for(ADDR_B).is_err());
        assert_eq!(wallet.signer_for(ADDR_A).unwrap().address(), ADDR_A);
    }
}
