//! Shared setup for command handlers

use crate::launcher::CommandLauncher;
use crate::provider::JsonlUsageProvider;
use switchback_core::{Config, Engine, Preset, SelectionPolicy};
use switchback_store::{JsonFileStore, Paths};

pub type CliEngine = Engine<JsonlUsageProvider, JsonFileStore>;

pub struct App {
    pub paths: Paths,
    pub engine: CliEngine,
}

impl App {
    /// Open state under `SWITCHBACK_HOME` or `~/.switchback`
    pub fn open() -> anyhow::Result<Self> {
        Self::open_at(Paths::new()?)
    }

    pub fn open_at(paths: Paths) -> anyhow::Result<Self> {
        let config = Config::load(&paths.config_file());
        let provider = JsonlUsageProvider::load(&paths.events_file())?;
        let store = JsonFileStore::open(&paths.store_file())?;

        let window_changes = provider.window_changes().to_vec();
        let mut engine = Engine::new(config, provider, store);
        for change in &window_changes {
            engine.record_window_change(&change.package_id, change.timestamp);
        }

        Ok(Self { paths, engine })
    }

    pub fn launcher(&self) -> CommandLauncher {
        CommandLauncher::new(self.engine.config().launch_command.clone())
    }

    /// Named preset, or the configured default
    pub fn policy(&self, name: Option<&str>) -> anyhow::Result<(Preset, SelectionPolicy)> {
        let name = name.unwrap_or(self.engine.config().default_policy.as_str());
        let preset: Preset = name.parse().map_err(anyhow::Error::msg)?;
        Ok((preset, preset.policy()))
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Local wall-clock rendering of a ms timestamp
pub fn format_ms(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| ms.to_string())
}
