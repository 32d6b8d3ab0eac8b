//! Normalizes the two usage data sources into a common shape

use crate::types::{AggregatedStat, UsageObservation};
use std::collections::HashMap;

/// Platform usage data. Both queries may return nothing; neither may fail.
pub trait UsageDataProvider {
    /// Whether the user granted access to usage data
    fn has_usage_access(&self) -> bool {
        true
    }

    /// Discrete events in `[begin, end)`, oldest first
    fn query_events(&self, begin: i64, end: i64) -> Vec<UsageObservation>;

    /// Aggregated per-package records in `[begin, end)`. The same package may
    /// appear more than once (one record per daily bucket).
    fn query_aggregated_stats(&self, begin: i64, end: i64) -> Vec<AggregatedStat>;
}

impl<P: UsageDataProvider + ?Sized> UsageDataProvider for &P {
    fn has_usage_access(&self) -> bool {
        (**self).has_usage_access()
    }

    fn query_events(&self, begin: i64, end: i64) -> Vec<UsageObservation> {
        (**self).query_events(begin, end)
    }

    fn query_aggregated_stats(&self, begin: i64, end: i64) -> Vec<AggregatedStat> {
        (**self).query_aggregated_stats(begin, end)
    }
}

/// One merged aggregate per package, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedStats {
    entries: Vec<AggregatedStat>,
    index: HashMap<String, usize>,
}

impl AggregatedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a raw record: the record with the greatest `last_used_at` wins
    /// whole. Foreground totals are not summed.
    pub fn merge(&mut self, stat: AggregatedStat) {
        match self.index.get(&stat.package_id) {
            Some(&i) => {
                if stat.last_used_at > self.entries[i].last_used_at {
                    self.entries[i] = stat;
                }
            }
            None => {
                self.index.insert(stat.package_id.clone(), self.entries.len());
                self.entries.push(stat);
            }
        }
    }

    pub fn get(&self, package_id: &str) -> Option<&AggregatedStat> {
        self.index.get(package_id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedStat> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<AggregatedStat> {
        self.entries
    }
}

impl FromIterator<AggregatedStat> for AggregatedStats {
    fn from_iter<I: IntoIterator<Item = AggregatedStat>>(iter: I) -> Self {
        let mut stats = AggregatedStats::new();
        for stat in iter {
            stats.merge(stat);
        }
        stats
    }
}

/// Pure adapter over a [`UsageDataProvider`]
pub struct Ingestor<'a> {
    provider: &'a dyn UsageDataProvider,
}

impl<'a> Ingestor<'a> {
    pub fn new(provider: &'a dyn UsageDataProvider) -> Self {
        Self { provider }
    }

    pub fn has_access(&self) -> bool {
        self.provider.has_usage_access()
    }

    /// Events in `[begin, end)` in chronological order. No access or an
    /// inverted window is "no data".
    pub fn events(&self, begin: i64, end: i64) -> Vec<UsageObservation> {
        if begin > end {
            return Vec::new();
        }
        if !self.has_access() {
            tracing::debug!("usage access missing, returning no events");
            return Vec::new();
        }

        let mut events = self.provider.query_events(begin, end);
        // Stable: equal timestamps keep provider order
        events.sort_by_key(|e| e.timestamp);
        events
    }

    /// Aggregates in `[begin, end)`, merged to one record per package
    pub fn aggregated(&self, begin: i64, end: i64) -> AggregatedStats {
        if begin > end || !self.has_access() {
            return AggregatedStats::new();
        }
        self.provider
            .query_aggregated_stats(begin, end)
            .into_iter()
            .collect()
    }
}

/// Foreground time per package, in order of first foreground transition.
///
/// A segment starts at a foreground transition and ends at the next foreground
/// transition of any package, at a background/pause/stop of the same package,
/// or at `end`.
pub fn foreground_durations(observations: &[UsageObservation], end: i64) -> Vec<(String, i64)> {
    let mut totals: Vec<(String, i64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(&str, i64)> = None;

    let mut close = |package: &str, from: i64, to: i64, totals: &mut Vec<(String, i64)>| {
        let slot = *positions.entry(package.to_string()).or_insert_with(|| {
            totals.push((package.to_string(), 0));
            totals.len() - 1
        });
        totals[slot].1 += (to - from).max(0);
    };

    for obs in observations {
        if obs.kind.is_foreground_transition() {
            if let Some((package, start)) = current.take() {
                close(package, start, obs.timestamp, &mut totals);
            }
            current = Some((obs.package_id.as_str(), obs.timestamp));
        } else if obs.kind.ends_foreground() {
            if let Some((package, start)) = current {
                if package == obs.package_id {
                    close(package, start, obs.timestamp, &mut totals);
                    current = None;
                }
            }
        }
    }

    if let Some((package, start)) = current {
        close(package, start, end, &mut totals);
    }

    totals
}
