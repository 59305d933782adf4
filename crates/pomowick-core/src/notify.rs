//! Best-effort user notifications.

use std::cell::RefCell;
use std::io::Write;

use notify_rust::Notification;

use crate::storage::NotificationSettings;

const APP_NAME: &str = "pomowick";

/// Fire-and-forget message delivery. Implementations never fail.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Terminal bell plus an optional desktop notification.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    bell: bool,
    desktop: bool,
}

impl TerminalNotifier {
    pub fn new(settings: &NotificationSettings) -> Self {
        Self {
            bell: settings.bell,
            desktop: settings.desktop,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        if self.bell {
            let mut out = std::io::stdout().lock();
            if let Err(e) = write!(out, "\n🔔 {message}\x07").and_then(|()| out.flush()) {
                tracing::debug!(error = %e, "bell write failed");
            }
        }
        if self.desktop {
            let shown = Notification::new()
                .summary("Pomodoro Timer")
                .body(message)
                .appname(APP_NAME)
                .icon("alarm-clock")
                .show();
            if let Err(e) = shown {
                tracing::debug!(error = %e, "desktop notification failed");
            }
        }
    }
}

/// Records messages instead of delivering them.
#[derive(Debug, Default)]
pub struct NullNotifier {
    sent: RefCell<Vec<String>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Notifier for NullNotifier {
    fn notify(&self, message: &str) {
        self.sent.borrow_mut().push(message.to_string());
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}
