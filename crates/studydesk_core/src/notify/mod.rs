//! Best-effort notification side channel.
//!
//! # Invariants
//! - Notifier calls never block domain operations and never report errors.
//! - An unavailable notification surface is not an error.

mod pulse;

pub use pulse::ChimePulse;

use log::{debug, info};
use std::fmt::Debug;
use std::io::Write;

pub const ONBOARDING_TITLE: &str = "Profile Activated";
pub const ONBOARDING_BODY: &str = "Welcome to your elite academic hub.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Notification capability used by the application shell.
pub trait Notifier: Send + Sync + Debug {
    fn request_permission(&self) -> Permission;
    fn notify(&self, title: &str, body: &str);
    fn play_chime(&self);
}

/// Headless notifier that only records events in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn notify(&self, title: &str, _body: &str) {
        info!(
            "event=notify module=notify status=ok sink=log title_len={}",
            title.len()
        );
    }

    fn play_chime(&self) {
        debug!("event=chime module=notify status=ok sink=log");
    }
}

/// Writes notifications and a terminal bell to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn write_stderr(&self, text: &str) {
        let mut stderr = std::io::stderr().lock();
        if let Err(err) = stderr.write_all(text.as_bytes()).and_then(|_| stderr.flush()) {
            debug!("event=notify module=notify status=error sink=terminal error={err}");
        }
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn notify(&self, title: &str, body: &str) {
        self.write_stderr(&format!("\x07[{title}] {body}\n"));
    }

    fn play_chime(&self) {
        self.write_stderr("\x07");
    }
}
