//! Transient user-visible notices
//!
//! Every outcome the user should see (progress, skipped work, failures) goes
//! through a [`Notifier`]; nothing is kept once shown.

use std::sync::Mutex;

pub trait Notifier: Send + Sync {
    fn notice(&self, message: &str);
}

/// Prints notices to stderr
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notice(&self, message: &str) {
        log::info!("notice: {}", message);
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

/// Keeps notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notice(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
