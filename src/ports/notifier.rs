//! Notifier Port - User-visible Feedback
//!
//! Every action ends in at most one notification. Front-ends decide
//! how to render them (blocking dialog, terminal line, JSON record).

use crate::domain::dataset::DatasetView;

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
  /// No wallet is installed.
  WalletUnavailable,
  /// Informational message (connection state changes).
  Info(String),
  /// An action completed.
  Success(String),
  /// An action failed. Deliberately generic.
  Error(String),
  /// Result of a dataset read.
  Dataset(DatasetView),
}

/// Sink for user notifications.
pub trait Notifier: Send + Sync + 'static {
  fn notify(&self, notification: Notification);
}
