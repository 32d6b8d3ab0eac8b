//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed block-list: launchers, system UI and vendor services nobody switches back to
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "com.google.android.tvlauncher",
    "com.google.android.apps.tv.launcherx",
    "com.google.android.leanbacklauncher",
    "com.android.systemui",
    "com.google.android.katniss",
    "com.google.android.backdrop",
    "com.google.android.tungsten.setupwraith",
    "com.google.android.tv.remote.service",
    "com.android.tv.settings",
    "com.android.vending",
];

/// Engine configuration. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the host application, never offered as a target
    pub self_package: String,

    /// Cadence of the periodic recent-apps refresh
    pub refresh_interval_ms: u64,

    /// Delay between automation steps, giving the settings UI time to render
    pub automation_step_delay_ms: u64,

    /// Delay between consecutive runs of a batch close
    pub batch_run_interval_ms: u64,

    /// Preset used when no policy is named explicitly
    pub default_policy: String,

    /// Lookback of the recently-used list
    pub history_window_mins: i64,

    /// Block-list written to the store on first read
    pub default_exclusions: Vec<String>,

    /// argv template for launching a package; `{package}` is substituted
    pub launch_command: Option<Vec<String>>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            self_package: "io.switchback".to_string(),
            refresh_interval_ms: 1_000,
            automation_step_delay_ms: 500,
            batch_run_interval_ms: 2_500,
            default_policy: "recent".to_string(),
            history_window_mins: 60,
            default_exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            launch_command: None,
        }
    }

    /// Load from `path`, falling back to defaults when missing or malformed
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::new(),
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::new()
            }
        }
    }

    pub fn history_window_ms(&self) -> i64 {
        self.history_window_mins.max(0).saturating_mul(60_000)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
