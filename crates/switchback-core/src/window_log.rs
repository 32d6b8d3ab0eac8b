//! Accessibility-observed window changes

use crate::types::{EventKind, UsageObservation};
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 64;

/// Bounded log of foreground window changes reported by the automation host
#[derive(Debug, Clone)]
pub struct WindowChangeLog {
    entries: VecDeque<(String, i64)>,
    capacity: usize,
}

impl WindowChangeLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Record that `package_id` took the foreground at `at`. A repeat of the
    /// newest entry only refreshes its timestamp.
    pub fn record(&mut self, package_id: &str, at: i64) {
        if let Some(newest) = self.entries.back_mut() {
            if newest.0 == package_id {
                newest.1 = newest.1.max(at);
                return;
            }
        }

        self.entries.push_back((package_id.to_string(), at));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Changes in `[begin, end)` as foreground observations, oldest first
    pub fn between(&self, begin: i64, end: i64) -> Vec<UsageObservation> {
        self.entries
            .iter()
            .filter(|(_, at)| (begin..end).contains(at))
            .map(|(package, at)| UsageObservation::new(package.clone(), *at, EventKind::Resumed))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WindowChangeLog {
    fn default() -> Self {
        Self::new()
    }
}
