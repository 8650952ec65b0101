//! Notification sink for the command-line front end

use accountdesk_core::Notifier;
use accountdesk_domain::{Notice, NoticeLevel};
use tracing::{error, info};

/// Renders notices as log lines, the terminal's stand-in for toasts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message, "notice"),
            NoticeLevel::Error => error!(notice = %notice.message, "notice"),
        }
    }
}
