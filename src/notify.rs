use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Utc>,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, text: &str) {
        self.notify(Notification {
            level: NoticeLevel::Success,
            text: text.to_string(),
            at: Utc::now(),
        });
    }

    fn error(&self, text: &str) {
        self.notify(Notification {
            level: NoticeLevel::Error,
            text: text.to_string(),
            at: Utc::now(),
        });
    }
}

/// Keeps every notification in arrival order.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `(level, text)` pairs, for when the timestamp doesn't matter.
    pub fn texts(&self) -> Vec<(NoticeLevel, String)> {
        self.entries()
            .into_iter()
            .map(|n| (n.level, n.text))
            .collect()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Prints toasts to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        let at = n.at.format("%H:%M:%S");
        match n.level {
            NoticeLevel::Success => println!("{at} [ok] {}", n.text),
            NoticeLevel::Error => eprintln!("{at} [error] {}", n.text),
        }
    }
}
