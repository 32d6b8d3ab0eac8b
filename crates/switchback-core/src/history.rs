//! Ordered deduplication of foreground observations

use crate::types::UsageObservation;

/// Distinct packages in recency order, oldest first.
///
/// Re-observing a package moves it to the newest position. Removal is a
/// linear scan; per-window event counts are small.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHistory {
    packages: Vec<String>,
}

impl OrderedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the foreground transitions of `observations` (oldest first).
    /// `self_package`, when given, never enters the history.
    pub fn from_observations(observations: &[UsageObservation], self_package: Option<&str>) -> Self {
        let mut history = Self::new();
        for obs in observations {
            if !obs.kind.is_foreground_transition() {
                continue;
            }
            if self_package == Some(obs.package_id.as_str()) {
                continue;
            }
            history.observe(&obs.package_id);
        }
        history
    }

    pub fn observe(&mut self, package_id: &str) {
        if let Some(pos) = self.packages.iter().position(|p| p == package_id) {
            self.packages.remove(pos);
        }
        self.packages.push(package_id.to_string());
    }

    /// Drop packages without disturbing the relative order of the rest
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.packages.retain(|p| keep(p));
    }

    pub fn oldest_first(&self) -> &[String] {
        &self.packages
    }

    pub fn most_recent_first(&self) -> Vec<String> {
        self.packages.iter().rev().cloned().collect()
    }

    pub fn newest(&self) -> Option<&str> {
        self.packages.last().map(String::as_str)
    }

    pub fn contains(&self, package_id: &str) -> bool {
        self.packages.iter().any(|p| p == package_id)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Last published recently-used list, for change detection between refreshes
#[derive(Debug, Clone, Default)]
pub struct RecentApps {
    packages: Vec<String>,
    refreshes: usize,
}

impl RecentApps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list. Returns false when `next` is positionally identical,
    /// in which case listeners should not be signalled.
    pub fn update(&mut self, next: Vec<String>) -> bool {
        self.refreshes += 1;
        if next == self.packages {
            return false;
        }
        self.packages = next;
        true
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}
