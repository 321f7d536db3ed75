//! Dataset Marketplace Client — Entry Point
//!
//! Initializes configuration, logging, the wallet, the contract
//! binder and the interactive front-end. Runs until `quit`, EOF or
//! SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (defaults when absent) + validate
//! 2. Init tracing (stderr, pretty or JSON)
//! 3. Load wallet keys from the env var named in config (absent → no wallet)
//! 4. Create the contract binder (alloy) for the fixed network/contract
//! 5. Create SessionManager + ActionDispatcher + MarketplaceClient
//!    (subscribes to account changes for the client's lifetime)
//! 6. Run the terminal front-end
//! 7. Shutdown: drop the account subscription

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use dataset_marketplace_client::adapters::chain::{AlloyContractBinder, UnavailableBinder};
use dataset_marketplace_client::adapters::metrics::MetricsRegistry;
use dataset_marketplace_client::adapters::terminal::{ConsoleNotifier, TerminalFrontend};
use dataset_marketplace_client::adapters::wallet::LocalWallet;
use dataset_marketplace_client::config::{self, ClientConfig, LogFormat};
use dataset_marketplace_client::ports::marketplace::ContractBinder;
use dataset_marketplace_client::ports::wallet::WalletProvider;
use dataset_marketplace_client::usecases::{ActionDispatcher, MarketplaceClient, SessionManager};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_or_default(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    init_tracing(&config.client);

    info!(
        title = %config.client.title,
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network.name,
        chain_id = config.network.chain_id,
        contract = %config.contract.address,
        "Starting Dataset Marketplace Client"
    );

    // ── 3. Wallet (absent when no keys are configured) ──────
    let wallet = LocalWallet::from_env(&config.wallet.keys_env)?.map(Arc::new);
    if wallet.is_none() {
        warn!(
            keys_env = %config.wallet.keys_env,
            "No wallet keys configured, connect will report wallet unavailable"
        );
    }

    // ── 4. Contract binder ──────────────────────────────────
    let binder: Arc<dyn ContractBinder> = match &wallet {
        Some(w) => Arc::new(
            AlloyContractBinder::from_config(&config, Arc::clone(w))
                .context("Failed to create contract binder")?,
        ),
        None => Arc::new(UnavailableBinder),
    };

    // ── 5. Session, dispatcher, client ──────────────────────
    let notifier = Arc::new(ConsoleNotifier::new(
        config.client.output,
        &config.wallet.keys_env,
    ));
    let wallet_port = wallet
        .clone()
        .map(|w| w as Arc<dyn WalletProvider>);
    let session = Arc::new(SessionManager::new(
        wallet_port,
        binder,
        notifier.clone(),
    ));
    let dispatcher = Arc::new(ActionDispatcher::new(
        notifier,
        config.client.currency_symbol.clone(),
    ));
    let client = MarketplaceClient::new(session, dispatcher);

    let metrics = Arc::new(MetricsRegistry::new().context("Failed to create metrics registry")?);

    // ── 6. Front-end ────────────────────────────────────────
    TerminalFrontend::new(client, wallet, metrics, config.client.title.clone())
        .run()
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Logs go to stderr; stdout belongs to the front-end.
fn init_tracing(client: &ClientConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&client.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match client.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
