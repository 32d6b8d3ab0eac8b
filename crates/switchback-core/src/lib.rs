//! Foreground-history resolution: recently used apps and switch-back targets

mod config;
mod engine;
mod error;
mod exclusion;
mod history;
mod ingest;
mod launch;
mod launcher;
mod policy;
mod refresh;
mod types;
mod window_log;

pub use config::{Config, DEFAULT_EXCLUSIONS};
pub use engine::{Engine, SwitchOutcome, SwitchTarget, TargetOrigin};
pub use error::{Result, SwitchError};
pub use exclusion::{ExclusionFilter, ExclusionSet, EXCLUDED_APPS_KEY};
pub use history::{OrderedHistory, RecentApps};
pub use ingest::{foreground_durations, AggregatedStats, Ingestor, UsageDataProvider};
pub use launch::{
    LaunchHistory, LaunchSnapshot, LAST_PACKAGE_KEY, LAST_USED_KEY, PREVIOUS_PACKAGE_KEY,
};
pub use launcher::{LaunchHandle, PackageLauncher};
pub use policy::{Preset, SelectionPolicy, SelectionSources, Source, TieBreak};
pub use refresh::{RefreshHost, RefreshLoop};
pub use types::{AggregatedStat, EventKind, UsageObservation};
pub use window_log::WindowChangeLog;
