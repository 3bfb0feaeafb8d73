//! Notification sink that writes toasts to the log

use tracing::{info, warn};

use super::NotificationSink;

/// Default sink when no UI is attached
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify_success(&self, text: &str) {
        info!(target: "toast", "{}", text);
    }

    fn notify_failure(&self, text: &str) {
        warn!(target: "toast", "{}", text);
    }
}
