//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Every field has a default: the marketplace contract is deployed at
//! a fixed address on BSC Testnet (chain id 97), so an empty file is
//! a complete configuration. Private keys never live here; the wallet
//! section only names the environment variable that holds them.

pub mod loader;

use alloy::primitives::Address;
use anyhow::Context;
use serde::Deserialize;

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Front-end and logging settings.
  pub client: ClientConfig,
  /// Network the contract lives on.
  pub network: NetworkConfig,
  /// Marketplace contract location.
  pub contract: ContractConfig,
  /// Local wallet key source.
  pub wallet: WalletConfig,
}

/// Front-end settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// Heading shown when the front-end starts.
  pub title: String,
  /// Log level (trace, debug, info, warn, error).
  pub log_level: String,
  /// Log encoding on stderr.
  pub log_format: LogFormat,
  /// Notification encoding on stdout.
  pub output: OutputFormat,
  /// Currency suffix used when displaying prices.
  pub currency_symbol: String,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// Human-readable text.
  #[default]
  Pretty,
  /// One JSON object per line.
  Json,
}

/// Notification encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

/// Network identity. Name resolution (ENS) is never used: addresses
/// must be hex literals.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
  /// Human-readable network name.
  pub name: String,
  /// Expected chain id, checked against the RPC on every bind.
  pub chain_id: u64,
  /// JSON-RPC HTTP endpoint.
  pub rpc_url: String,
}

/// Marketplace contract location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
  /// Deployed contract address (hex).
  pub address: String,
}

/// Local wallet configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
  /// Environment variable holding comma-separated hex private keys.
  /// Unset or empty means no wallet is installed.
  pub keys_env: String,
}

impl ContractConfig {
  /// Parse the configured address.
  pub fn address(&self) -> anyhow::Result<Address> {
    self
      .address
      .parse()
      .with_context(|| format!("Invalid contract address: {}", self.address))
  }
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      title: "AI Dataset Marketplace".to_string(),
      log_level: "info".to_string(),
      log_format: LogFormat::default(),
      output: OutputFormat::default(),
      currency_symbol: "ETH".to_string(),
    }
  }
}

impl Default for NetworkConfig {
  fn default() -> Self {
    Self {
      name: "Binance Smart Chain Testnet".to_string(),
      chain_id: 97,
      rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545".to_string(),
    }
  }
}

impl Default for ContractConfig {
  fn default() -> Self {
    Self {
      address: "0x672C58cab737bE70B1f574eD3a960395f3Cadf85".to_string(),
    }
  }
}

impl Default for WalletConfig {
  fn default() -> Self {
    Self {
      keys_env: "MARKETPLACE_PRIVATE_KEYS".to_string(),
    }
  }
}
