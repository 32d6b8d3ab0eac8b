#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use switchback_automation::{AutomationHost, UiElement, WindowRoot};
use switchback_core::{
    AggregatedStat, Config, EventKind, LaunchHandle, PackageLauncher, UsageDataProvider,
    UsageObservation,
};

pub const SELF_PACKAGE: &str = "io.switchback";

pub fn sample_config() -> Config {
    Config {
        self_package: SELF_PACKAGE.to_string(),
        default_exclusions: vec!["com.google.android.tvlauncher".to_string()],
        ..Config::new()
    }
}

pub fn fg(package: &str, timestamp: i64) -> UsageObservation {
    UsageObservation::new(package, timestamp, EventKind::Foreground)
}

/// In-memory usage provider with a switchable access flag
#[derive(Default)]
pub struct MemoryProvider {
    pub access: bool,
    pub events: Vec<UsageObservation>,
    pub stats: Vec<AggregatedStat>,
}

impl MemoryProvider {
    pub fn with_events(events: Vec<UsageObservation>) -> Self {
        Self {
            access: true,
            events,
            stats: Vec::new(),
        }
    }
}

impl UsageDataProvider for MemoryProvider {
    fn has_usage_access(&self) -> bool {
        self.access
    }

    fn query_events(&self, begin: i64, end: i64) -> Vec<UsageObservation> {
        self.events
            .iter()
            .filter(|e| e.timestamp >= begin && e.timestamp < end)
            .cloned()
            .collect()
    }

    fn query_aggregated_stats(&self, _begin: i64, _end: i64) -> Vec<AggregatedStat> {
        self.stats.clone()
    }
}

/// Launcher that records every handle it is asked to start
#[derive(Default)]
pub struct RecordingLauncher {
    pub leanback: Vec<String>,
    pub unlaunchable: Vec<String>,
    pub launched: Vec<LaunchHandle>,
}

impl PackageLauncher for RecordingLauncher {
    fn leanback_launch(&self, package_id: &str) -> Option<LaunchHandle> {
        self.leanback
            .iter()
            .any(|p| p == package_id)
            .then(|| LaunchHandle::Leanback(package_id.to_string()))
    }

    fn default_launch(&self, package_id: &str) -> Option<LaunchHandle> {
        (!self.unlaunchable.iter().any(|p| p == package_id))
            .then(|| LaunchHandle::Default(package_id.to_string()))
    }

    fn launch(&mut self, handle: &LaunchHandle) -> Result<(), String> {
        self.launched.push(handle.clone());
        Ok(())
    }
}

pub type ActionLog = Rc<RefCell<Vec<String>>>;

/// App-details screen with a force-stop button that turns into a confirm
/// dialog once clicked
pub struct SettingsHost {
    dialog_open: bool,
    log: ActionLog,
}

impl SettingsHost {
    pub fn new(log: ActionLog) -> Self {
        Self {
            dialog_open: false,
            log,
        }
    }
}

impl AutomationHost for SettingsHost {
    fn active_window_root(&mut self) -> Option<WindowRoot> {
        Some(WindowRoot {
            id: u64::from(self.dialog_open),
            package: Some("com.android.tv.settings".to_string()),
        })
    }

    fn find_by_text(&mut self, root: &WindowRoot, text: &str) -> Vec<UiElement> {
        let label = if root.id == 0 { "Force stop" } else { "OK" };
        if label.contains(text) {
            vec![UiElement {
                id: root.id,
                text: label.to_string(),
                clickable: true,
                enabled: true,
            }]
        } else {
            Vec::new()
        }
    }

    fn click(&mut self, element: &UiElement) -> bool {
        self.log.borrow_mut().push(format!("click:{}", element.text));
        self.dialog_open = !self.dialog_open;
        true
    }

    fn navigate_back(&mut self) {
        self.log.borrow_mut().push("back".to_string());
    }

    fn trigger_system_overview(&mut self) {
        self.log.borrow_mut().push("overview".to_string());
    }

    fn open_app_details(&mut self, package_id: &str) {
        self.dialog_open = false;
        self.log.borrow_mut().push(format!("open:{}", package_id));
    }
}
