//! Launching packages through a configured command

use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;
use switchback_core::{LaunchHandle, PackageLauncher};

static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap()
});

/// Package opened for [`LaunchHandle::SystemSettings`]
const SETTINGS_PACKAGE: &str = "com.android.tv.settings";

/// True for dotted identifiers like `com.netflix.ninja`
pub fn is_valid_package(package_id: &str) -> bool {
    PACKAGE_RE.is_match(package_id)
}

/// Launches by running `launch_command` with `{package}` substituted.
///
/// With a command configured every valid package has a TV entry point;
/// without one, launches are printed instead of executed.
#[derive(Debug, Clone, Default)]
pub struct CommandLauncher {
    command: Option<Vec<String>>,
}

impl CommandLauncher {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self { command }
    }

    fn run(&self, package_id: &str) -> Result<(), String> {
        let Some(template) = &self.command else {
            println!("(dry run) launch {}", package_id);
            return Ok(());
        };

        let argv: Vec<String> = template
            .iter()
            .map(|arg| arg.replace("{package}", package_id))
            .collect();
        let Some((program, args)) = argv.split_first() else {
            return Err("launch_command is empty".to_string());
        };

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", program, status))
        }
    }
}

impl PackageLauncher for CommandLauncher {
    fn leanback_launch(&self, package_id: &str) -> Option<LaunchHandle> {
        (self.command.is_some() && is_valid_package(package_id))
            .then(|| LaunchHandle::Leanback(package_id.to_string()))
    }

    fn default_launch(&self, package_id: &str) -> Option<LaunchHandle> {
        is_valid_package(package_id).then(|| LaunchHandle::Default(package_id.to_string()))
    }

    fn launch(&mut self, handle: &LaunchHandle) -> Result<(), String> {
        match handle {
            LaunchHandle::Leanback(package) | LaunchHandle::Default(package) => self.run(package),
            LaunchHandle::SystemSettings => self.run(SETTINGS_PACKAGE),
        }
    }
}
