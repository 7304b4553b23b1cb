//! User-facing notices.
//!
//! Widgets that need to tell the user something synchronously (a rejected
//! drop, a bad file pick) go through a [`Notifier`]. The host decides how to
//! show it: a modal alert, a toast, a status line.
//!
//! # Example
//!
//! ```ignore
//! // Any closure taking a message is a notifier.
//! let notifier = Arc::new(|message: &str| show_alert_dialog(message));
//! bind_drop_zone(&doc, "zone", policy, notifier, on_file)?;
//! ```

use log::warn;

/// Surfaces a message to the user.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user. Called synchronously from event handlers.
    fn alert(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn alert(&self, message: &str) {
        self(message)
    }
}

/// Writes notices to the log instead of showing them.
///
/// Useful for headless hosts and as a default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("{message}");
    }
}
