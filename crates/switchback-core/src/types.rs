//! Core usage data types

use serde::{Deserialize, Serialize};

/// Kind of a raw usage event. Codes the platform adds later are kept as
/// `Unknown` instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Foreground,
    Background,
    Resumed,
    Paused,
    Stopped,
    Interaction,
    Notification,
    Unknown(i32),
}

impl EventKind {
    /// Map a platform event code
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => EventKind::Foreground,
            2 => EventKind::Background,
            7 => EventKind::Interaction,
            12 => EventKind::Notification,
            23 => EventKind::Stopped,
            other => EventKind::Unknown(other),
        }
    }

    /// True for kinds that mean "this package just became visible"
    pub fn is_foreground_transition(self) -> bool {
        matches!(self, EventKind::Foreground | EventKind::Resumed)
    }

    /// True for kinds that end the current foreground segment of a package
    pub fn ends_foreground(self) -> bool {
        matches!(
            self,
            EventKind::Background | EventKind::Paused | EventKind::Stopped
        )
    }
}

/// A single normalized usage event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageObservation {
    pub package_id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub kind: EventKind,
}

impl UsageObservation {
    pub fn new(package_id: impl Into<String>, timestamp: i64, kind: EventKind) -> Self {
        Self {
            package_id: package_id.into(),
            timestamp,
            kind,
        }
    }
}

/// Per-package aggregate over a query window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStat {
    pub package_id: String,
    pub last_used_at: i64,
    #[serde(default)]
    pub total_foreground_ms: i64,
}
