//! Package launcher contract

use serde::{Deserialize, Serialize};

/// Opaque handle a launcher knows how to start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchHandle {
    /// TV-optimized entry point of a package
    Leanback(String),
    /// Generic launcher entry point of a package
    Default(String),
    /// The platform settings screen, used for settings-like packages that
    /// expose no entry point of their own
    SystemSettings,
}

pub trait PackageLauncher {
    fn leanback_launch(&self, package_id: &str) -> Option<LaunchHandle>;

    fn default_launch(&self, package_id: &str) -> Option<LaunchHandle>;

    /// Prefer the TV-optimized form when both exist
    fn resolve_launch_target(&self, package_id: &str) -> Option<LaunchHandle> {
        self.leanback_launch(package_id)
            .or_else(|| self.default_launch(package_id))
    }

    fn launch(&mut self, handle: &LaunchHandle) -> Result<(), String>;
}
