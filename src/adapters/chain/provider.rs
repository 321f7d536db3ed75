//! Signing RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Builds a signing HTTP provider for one account on the configured
//! network and validates that the RPC endpoint actually serves the
//! expected chain id before anything is submitted through it.
//!
//! In alloy 0.9 providers are generic over their transport, and the
//! filler stack returned by `on_http` is a deeply nested type. It is
//! kept opaque behind [`build_http_provider`] and carried as a type
//! parameter `P: Provider<HttpTransport>` by the adapters.

use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use alloy::transports::http::{Client, Http};
use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::NetworkConfig;

/// Transport every marketplace provider runs over.
pub type HttpTransport = Http<Client>;

/// Build an HTTP provider with nonce/gas/chain-id fillers that signs
/// with `signer`. No request is made until the provider is used.
pub fn build_http_provider(
    url: Url,
    signer: PrivateKeySigner,
) -> impl Provider<HttpTransport> + Clone + Send + Sync + 'static {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(url)
}

/// RPC provider that signs with one session account.
pub struct SigningProvider<P> {
    provider: P,
    /// Network name, for diagnostics.
    network: String,
}

impl<P> SigningProvider<P>
where
    P: Provider<HttpTransport> + Clone + Send + Sync + 'static,
{
    /// Wrap `provider` after checking the RPC serves `config.chain_id`.
    ///
    /// Addresses are only ever passed as parsed hex values; no name
    /// resolution is attempted.
    #[instrument(skip_all, fields(network = %config.name, chain_id = config.chain_id))]
    pub async fn connect(config: &NetworkConfig, provider: P) -> Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        anyhow::ensure!(
            chain_id == config.chain_id,
            "Expected {} (chain_id={}), got chain_id={chain_id}",
            config.name,
            config.chain_id
        );

        info!(chain_id, "Connected to RPC");

        Ok(Self {
            provider,
            network: config.name.clone(),
        })
    }

    /// The underlying alloy provider.
    pub const fn inner(&self) -> &P {
        &self.provider
    }

    pub fn network(&self) -> &str {
        &self.network
    }
}
