//! Usage data read from the JSONL event log

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use switchback_core::{
    foreground_durations, AggregatedStat, EventKind, UsageDataProvider, UsageObservation,
};
use switchback_store::read_jsonl;

/// One line of `events.jsonl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub package_id: String,
    pub timestamp: i64,
    pub kind: EventKind,
    /// Seen by the automation host rather than the usage log
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub window_change: bool,
}

impl EventRecord {
    fn into_observation(self) -> UsageObservation {
        UsageObservation::new(self.package_id, self.timestamp, self.kind)
    }
}

/// Provider over a recorded event log. A missing log reads as "usage access
/// not granted" so the front end can tell the user how to populate it.
#[derive(Debug, Clone, Default)]
pub struct JsonlUsageProvider {
    path: Option<PathBuf>,
    available: bool,
    events: Vec<UsageObservation>,
    window_changes: Vec<UsageObservation>,
}

impl JsonlUsageProvider {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let mut provider = Self {
            path: Some(path.to_path_buf()),
            ..Default::default()
        };
        provider.reload()?;
        Ok(provider)
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let mut provider = Self {
            available: true,
            ..Default::default()
        };
        provider.assign(records);
        provider
    }

    /// Re-read the log from disk
    pub fn reload(&mut self) -> std::io::Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        self.available = path.exists();
        let records: Vec<EventRecord> = read_jsonl(&path)?;
        self.assign(records);
        Ok(())
    }

    fn assign(&mut self, records: Vec<EventRecord>) {
        let (window, usage): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.window_change);

        self.events = usage.into_iter().map(EventRecord::into_observation).collect();
        self.events.sort_by_key(|o| o.timestamp);

        self.window_changes = window.into_iter().map(EventRecord::into_observation).collect();
        self.window_changes.sort_by_key(|o| o.timestamp);
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn window_changes(&self) -> &[UsageObservation] {
        &self.window_changes
    }
}

impl UsageDataProvider for JsonlUsageProvider {
    fn has_usage_access(&self) -> bool {
        self.available
    }

    fn query_events(&self, begin: i64, end: i64) -> Vec<UsageObservation> {
        self.events
            .iter()
            .filter(|o| o.timestamp >= begin && o.timestamp < end)
            .cloned()
            .collect()
    }

    /// Aggregates derived from the events in the window: last foreground
    /// transition and total foreground time per package
    fn query_aggregated_stats(&self, begin: i64, end: i64) -> Vec<AggregatedStat> {
        let events = self.query_events(begin, end);

        let mut last_used: HashMap<&str, i64> = HashMap::new();
        for obs in events.iter().filter(|o| o.kind.is_foreground_transition()) {
            last_used.insert(obs.package_id.as_str(), obs.timestamp);
        }

        foreground_durations(&events, end)
            .into_iter()
            .map(|(package_id, total_foreground_ms)| AggregatedStat {
                last_used_at: last_used.get(package_id.as_str()).copied().unwrap_or(0),
                package_id,
                total_foreground_ms,
            })
            .collect()
    }
}
