//! Terminal Front-end - Interactive Marketplace Console
//!
//! Line-oriented replacement for the marketplace web page: one command
//! per form, notifications on stdout, logs on stderr. Each action runs
//! as its own task so the prompt stays responsive while a transaction
//! is pending.

pub mod commands;
pub mod console;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::adapters::metrics::MetricsRegistry;
use crate::adapters::wallet::LocalWallet;
use crate::domain::form::FormField;
use crate::domain::session::short_address;
use crate::usecases::action_dispatcher::ActionKind;
use crate::usecases::client::MarketplaceClient;
use crate::usecases::session_manager::ConnectOutcome;

pub use commands::{Command, CommandError, HELP};
pub use console::ConsoleNotifier;

/// Interactive front-end over a [`MarketplaceClient`].
pub struct TerminalFrontend {
    client: MarketplaceClient,
    /// `None` when no wallet is installed.
    wallet: Option<Arc<LocalWallet>>,
    metrics: Arc<MetricsRegistry>,
    /// Keeps the session gauge current; aborted on drop.
    session_gauge: JoinHandle<()>,
    title: String,
}

impl TerminalFrontend {
    /// Must be called inside a tokio runtime.
    pub fn new(
        client: MarketplaceClient,
        wallet: Option<Arc<LocalWallet>>,
        metrics: Arc<MetricsRegistry>,
        title: impl Into<String>,
    ) -> Self {
        let session_gauge = metrics.track_session(client.watch_session());
        Self {
            client,
            wallet,
            metrics,
            session_gauge,
            title: title.into(),
        }
    }

    /// Read commands from stdin until `quit`, EOF or Ctrl-C.
    pub async fn run(mut self) -> Result<()> {
        println!("{}", self.title);
        println!("{}", self.client.session().await.label());
        println!("Type `help` for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                biased;
                _ = signal::ctrl_c() => {
                    info!("SIGINT received, closing front-end");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read stdin")? else {
                        info!("stdin closed");
                        break;
                    };
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
            }
        }

        self.client.shutdown();
        info!("Front-end stopped");
        Ok(())
    }

    /// Execute one input line. Returns `false` when the user quits.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                return true;
            }
        };

        match command {
            Command::Empty => {}
            Command::Connect => self.spawn_connect(),
            Command::Set { field, value } => self.client.set_field(field, value),
            Command::Form => self.print_form(),
            Command::Accounts => self.print_accounts(),
            Command::Use(address) => match self.wallet.as_deref() {
                Some(wallet) => {
                    if let Err(e) = wallet.select_account(address) {
                        println!("{e}");
                    }
                }
                None => println!("No wallet installed"),
            },
            Command::Lock => match self.wallet.as_deref() {
                Some(wallet) => wallet.lock(),
                None => println!("No wallet installed"),
            },
            Command::Status => self.print_status().await,
            Command::Metrics => match self.metrics.render() {
                Ok(text) => print!("{text}"),
                Err(e) => warn!(error = %e, "Failed to render metrics"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
            action => {
                if let Some(kind) = action.apply_to(self.client.form_mut()) {
                    self.spawn_action(kind);
                }
            }
        }

        true
    }

    fn spawn_connect(&self) {
        let handle = self.client.spawn_connect();
        tokio::spawn(async move {
            match handle.await {
                Ok(ConnectOutcome::Connected(account)) => {
                    println!("Connected: {}", short_address(&account));
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "Connect task panicked"),
            }
        });
    }

    fn spawn_action(&self, kind: ActionKind) {
        let handle = self.client.submit(kind);
        let metrics = Arc::clone(&self.metrics);
        tokio::spawn(async move {
            match handle.await {
                Ok(outcome) => metrics.record_action(kind, &outcome),
                Err(e) => error!(action = %kind, error = %e, "Action task panicked"),
            }
        });
    }

    fn print_form(&self) {
        let form = self.client.form();
        for field in FormField::ALL {
            println!("  {:<16} {:?}", field.placeholder(), form.get(field));
        }
    }

    fn print_accounts(&self) {
        let Some(wallet) = self.wallet.as_deref() else {
            println!("No wallet installed");
            return;
        };
        for address in wallet.addresses() {
            println!("  {address} ({})", short_address(&address));
        }
    }

    async fn print_status(&self) {
        let session = self.client.session().await;
        println!("{}", session.label());
        if !self.client.is_listening() {
            println!("  (not listening for account changes)");
        }
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        self.session_gauge.abort();
    }
}
