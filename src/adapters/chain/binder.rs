//! Contract Binder - Session-scoped Contract Handles
//!
//! Implements the `ContractBinder` port: for each session account it
//! fetches the account's signer from the local wallet, opens a signing
//! provider on the fixed network and binds the fixed contract address.
//! Every call builds a fresh handle; nothing is reused across sessions.

use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::adapters::wallet::LocalWallet;
use crate::config::{AppConfig, NetworkConfig};
use crate::ports::marketplace::{ContractBinder, MarketplaceContract};

use super::contracts::DatasetMarketplace;
use super::provider::{build_http_provider, SigningProvider};

/// Binds the marketplace contract through alloy for wallet accounts.
pub struct AlloyContractBinder {
    network: NetworkConfig,
    contract_address: Address,
    wallet: Arc<LocalWallet>,
}

impl AlloyContractBinder {
    pub const fn new(network: NetworkConfig, contract_address: Address, wallet: Arc<LocalWallet>) -> Self {
        Self {
            network,
            contract_address,
            wallet,
        }
    }

    /// Build from the loaded configuration.
    pub fn from_config(config: &AppConfig, wallet: Arc<LocalWallet>) -> Result<Self> {
        let address = config.contract.address()?;
        Ok(Self::new(config.network.clone(), address, wallet))
    }
}

#[async_trait]
impl ContractBinder for AlloyContractBinder {
    #[instrument(skip(self), fields(network = %self.network.name))]
    async fn bind(&self, account: Address) -> Result<Arc<dyn MarketplaceContract>> {
        let signer = self
            .wallet
            .signer_for(account)
            .context("No signer for session account")?;

        let url = self.network.rpc_url.parse().context("Invalid RPC URL")?;
        let provider =
            SigningProvider::connect(&self.network, build_http_provider(url, signer)).await?;
        let contract =
            DatasetMarketplace::new(provider, self.contract_address, account).await?;

        info!(account = %account, contract = %self.contract_address, "Contract binding built");
        Ok(Arc::new(contract))
    }
}

/// Binder used when no wallet is installed. Never reached in practice:
/// the session manager refuses to connect without a wallet.
pub struct UnavailableBinder;

#[async_trait]
impl ContractBinder for UnavailableBinder {
    async fn bind(&self, account: Address) -> Result<Arc<dyn MarketplaceContract>> {
        anyhow::bail!("No wallet installed, cannot bind contract for {account}")
    }
}
