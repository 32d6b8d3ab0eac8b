//! Switch-back target selection
//!
//! A policy is configured along three independent axes:
//!
//! - **Source**: where observations come from (discrete events, daily
//!   aggregates, or window changes seen by the automation host).
//! - **Window**: how far back to look from `now`.
//! - **Tie-break**: how one candidate is chosen from the filtered set.
//!
//! Every rule except [`TieBreak::NoFilter`] drops the host package and the
//! exclusion set before comparing. Exclusions are applied after ordering, so
//! they never shift the recency of the remaining packages.

use crate::exclusion::ExclusionSet;
use crate::history::OrderedHistory;
use crate::ingest::{foreground_durations, AggregatedStats, Ingestor};
use crate::types::{AggregatedStat, UsageObservation};
use crate::window_log::WindowChangeLog;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Events,
    Aggregated,
    WindowChanges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Most recently used wins
    Newest,
    /// Largest foreground time wins; on equal values the first seen wins
    LongestForeground,
    /// Skip the newest candidate and take the second, for apps that keep
    /// refreshing themselves in the background
    SkipNewest,
    /// Newest wins with no self or exclusion filtering. Troubleshooting only.
    NoFilter,
}

/// Everything a policy may read from
pub struct SelectionSources<'a> {
    pub ingestor: Ingestor<'a>,
    pub window_log: &'a WindowChangeLog,
    pub self_package: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub source: Source,
    pub window: Duration,
    pub tie_break: TieBreak,
}

impl SelectionPolicy {
    pub fn new(source: Source, window: Duration, tie_break: TieBreak) -> Self {
        Self {
            source,
            window,
            tie_break,
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }

    /// Pick one target, or `None` when the window yields nothing past filtering
    pub fn select(
        &self,
        sources: &SelectionSources<'_>,
        excluded: &ExclusionSet,
        now: i64,
    ) -> Option<String> {
        let begin = now.saturating_sub(self.window_ms());
        let filtering = self.tie_break != TieBreak::NoFilter;
        let self_package = sources.self_package;
        let keep =
            |p: &str| !filtering || (p != self_package && !excluded.contains(p));

        let selected = match self.source {
            Source::Events => {
                let observations = sources.ingestor.events(begin, now);
                self.from_observations(&observations, filtering.then_some(self_package), &keep, now)
            }
            Source::WindowChanges => {
                let observations = sources.window_log.between(begin, now);
                self.from_observations(&observations, filtering.then_some(self_package), &keep, now)
            }
            Source::Aggregated => {
                self.from_stats(sources.ingestor.aggregated(begin, now), &keep)
            }
        };

        tracing::debug!(
            source = ?self.source,
            tie_break = ?self.tie_break,
            window_ms = self.window_ms(),
            selected = ?selected,
            "policy selection"
        );
        selected
    }

    fn from_observations(
        &self,
        observations: &[UsageObservation],
        self_package: Option<&str>,
        keep: &dyn Fn(&str) -> bool,
        now: i64,
    ) -> Option<String> {
        if self.tie_break == TieBreak::LongestForeground {
            let candidates = foreground_durations(observations, now)
                .into_iter()
                .filter(|(p, _)| keep(p.as_str()));
            return first_max_by_key(candidates, |(_, ms)| *ms).map(|(p, _)| p);
        }

        let mut history = OrderedHistory::from_observations(observations, self_package);
        history.retain(keep);
        let mut ranked = history.most_recent_first().into_iter();

        match self.tie_break {
            TieBreak::SkipNewest => ranked.nth(1),
            _ => ranked.next(),
        }
    }

    fn from_stats(&self, stats: AggregatedStats, keep: &dyn Fn(&str) -> bool) -> Option<String> {
        // Untouched packages report a zero last-used time
        let candidates = stats
            .into_vec()
            .into_iter()
            .filter(|s| s.last_used_at > 0 && keep(s.package_id.as_str()));

        let stat = match self.tie_break {
            TieBreak::Newest | TieBreak::NoFilter => {
                first_max_by_key(candidates, |s| s.last_used_at)
            }
            TieBreak::LongestForeground => {
                first_max_by_key(candidates, |s| s.total_foreground_ms)
            }
            TieBreak::SkipNewest => {
                let mut ranked: Vec<AggregatedStat> = candidates.collect();
                ranked.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
                ranked.into_iter().nth(1)
            }
        };
        stat.map(|s| s.package_id)
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Preset::Recent.policy()
    }
}

/// Maximum by key where equal keys keep the earliest item
fn first_max_by_key<T, I, F>(items: I, key: F) -> Option<T>
where
    I: Iterator<Item = T>,
    F: Fn(&T) -> i64,
{
    let mut best: Option<(i64, T)> = None;
    for item in items {
        let k = key(&item);
        match &best {
            Some((best_key, _)) if k <= *best_key => {}
            _ => best = Some((k, item)),
        }
    }
    best.map(|(_, item)| item)
}

/// Named policy configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Recent,
    Hourly,
    SkipRefreshing,
    Longest,
    Daily,
    Accessibility,
    Diagnostic,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Recent,
        Preset::Hourly,
        Preset::SkipRefreshing,
        Preset::Longest,
        Preset::Daily,
        Preset::Accessibility,
        Preset::Diagnostic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Recent => "recent",
            Preset::Hourly => "hourly",
            Preset::SkipRefreshing => "skip-refreshing",
            Preset::Longest => "longest",
            Preset::Daily => "daily",
            Preset::Accessibility => "accessibility",
            Preset::Diagnostic => "diagnostic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Recent => "newest foreground event in the last 10 minutes",
            Preset::Hourly => "newest foreground event in the last hour",
            Preset::SkipRefreshing => "second-newest foreground event in the last 4 hours",
            Preset::Longest => "largest aggregated foreground time in the last 6 hours",
            Preset::Daily => "newest aggregated last-used time in the last 24 hours",
            Preset::Accessibility => "newest observed window change in the last hour",
            Preset::Diagnostic => "newest event in 24 hours, unfiltered (troubleshooting)",
        }
    }

    pub fn policy(self) -> SelectionPolicy {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        let (source, secs, tie_break) = match self {
            Preset::Recent => (Source::Events, 10 * MINUTE, TieBreak::Newest),
            Preset::Hourly => (Source::Events, HOUR, TieBreak::Newest),
            Preset::SkipRefreshing => (Source::Events, 4 * HOUR, TieBreak::SkipNewest),
            Preset::Longest => (Source::Aggregated, 6 * HOUR, TieBreak::LongestForeground),
            Preset::Daily => (Source::Aggregated, 24 * HOUR, TieBreak::Newest),
            Preset::Accessibility => (Source::WindowChanges, HOUR, TieBreak::Newest),
            Preset::Diagnostic => (Source::Events, 24 * HOUR, TieBreak::NoFilter),
        };
        SelectionPolicy::new(source, Duration::from_secs(secs), tie_break)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown policy preset: {}", s))
    }
}
