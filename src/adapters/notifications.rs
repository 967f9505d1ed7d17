//! Notification sinks

use crate::agents::domain::{Notification, NotificationSink, NotificationStatus};

/// Writes notifications as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.status {
            NotificationStatus::Success => tracing::info!("{}", notification.message),
            NotificationStatus::Error => tracing::error!("{}", notification.message),
        }
    }
}
