//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    network = %config.network.name,
    chain_id = config.network.chain_id,
    contract = %config.contract.address,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the built-in
/// defaults. A file that exists but is invalid is still an error.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
  if Path::new(path).exists() {
    return load_config(path);
  }

  warn!(path, "Config file not found, using built-in defaults");
  let config = AppConfig::default();
  validate_config(&config)?;
  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A parseable, non-zero contract address
/// - A non-zero chain id and an http(s) RPC URL
/// - A non-empty key environment variable name
fn validate_config(config: &AppConfig) -> Result<()> {
  let address = config.contract.address()?;
  anyhow::ensure!(
    !address.is_zero(),
    "Contract address must not be the zero address"
  );

  anyhow::ensure!(
    config.network.chain_id > 0,
    "Network chain_id must be positive"
  );
  anyhow::ensure!(
    !config.network.name.is_empty(),
    "Network name must not be empty"
  );
  anyhow::ensure!(
    config.network.rpc_url.starts_with("http://")
      || config.network.rpc_url.starts_with("https://"),
    "RPC URL must be http(s), got {}",
    config.network.rpc_url
  );

  anyhow::ensure!(
    !config.wallet.keys_env.is_empty(),
    "wallet.keys_env must name an environment variable"
  );
  anyhow::ensure!(
    !config.client.currency_symbol.is_empty(),
    "client.currency_symbol must not be empty"
  );

  Ok(())
}
