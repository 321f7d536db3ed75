//! Console Notifier - stdout Notifications
//!
//! Implements the `Notifier` port by writing one block per
//! notification to stdout, as text or as one JSON object per line.
//! Logs go to stderr, so stdout carries only user-facing output.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::domain::dataset::DatasetView;
use crate::ports::notifier::{Notification, Notifier};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    WalletUnavailable { message: &'a str },
    Info { message: &'a str },
    Success { message: &'a str },
    Error { message: &'a str },
    Dataset { dataset: &'a DatasetView },
}

/// Writes notifications to stdout.
pub struct ConsoleNotifier {
    format: OutputFormat,
    /// Hint shown when no wallet is installed.
    wallet_hint: String,
}

impl ConsoleNotifier {
    /// `keys_env` names the variable users must set to install a wallet.
    pub fn new(format: OutputFormat, keys_env: &str) -> Self {
        Self {
            format,
            wallet_hint: format!("Please install a wallet! (set {keys_env})"),
        }
    }

    /// Render a notification without printing it.
    pub fn render(&self, notification: &Notification) -> String {
        match self.format {
            OutputFormat::Text => self.render_text(notification),
            OutputFormat::Json => self.render_json(notification),
        }
    }

    fn render_text(&self, notification: &Notification) -> String {
        match notification {
            Notification::WalletUnavailable => format!("[!] {}", self.wallet_hint),
            Notification::Info(msg) => format!("[i] {msg}"),
            Notification::Success(msg) => format!("[ok] {msg}"),
            Notification::Error(msg) => format!("[error] {msg}"),
            Notification::Dataset(view) => view.to_string(),
        }
    }

    fn render_json(&self, notification: &Notification) -> String {
        let record = match notification {
            Notification::WalletUnavailable => Record::WalletUnavailable {
                message: &self.wallet_hint,
            },
            Notification::Info(message) => Record::Info { message },
            Notification::Success(message) => Record::Success { message },
            Notification::Error(message) => Record::Error { message },
            Notification::Dataset(dataset) => Record::Dataset { dataset },
        };
        serde_json::to_string(&record).unwrap_or_else(|e| {
            format!(r#"{{"kind":"error","message":"unencodable notification: {e}"}}"#)
        })
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("{}", self.render(&notification));
    }
}
