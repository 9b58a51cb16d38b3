//! Single-slot alert channel. A new alert replaces whatever is showing —
//! there is no queue — and an alert stops being active after a fixed
//! five-second interval.

use std::time::{Duration, Instant};

pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AlertSlot {
    current: Option<(Alert, Instant)>,
}

impl AlertSlot {
    pub fn show(&mut self, alert: Alert) {
        self.show_at(alert, Instant::now());
    }

    fn show_at(&mut self, alert: Alert, shown_at: Instant) {
        self.current = Some((alert, shown_at));
    }

    /// The alert currently showing, if its five seconds have not elapsed.
    pub fn active(&self) -> Option<&Alert> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < AUTO_DISMISS_AFTER)
            .map(|(alert, _)| alert)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
