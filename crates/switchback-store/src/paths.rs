//! Path resolution for persisted state

use std::path::PathBuf;

/// Environment variable that overrides the state directory
pub const HOME_ENV: &str = "SWITCHBACK_HOME";

/// Resolves standard paths for switchback state files
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    /// Resolve from `SWITCHBACK_HOME`, falling back to `~/.switchback`
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(dir)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::at(home.join(".switchback")))
    }

    pub fn at(home: PathBuf) -> Self {
        Self { home }
    }

    /// Key/value store document
    pub fn store_file(&self) -> PathBuf {
        self.home.join("store.json")
    }

    /// Usage observation log consumed by the file-backed provider
    pub fn events_file(&self) -> PathBuf {
        self.home.join("events.jsonl")
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.json")
    }
}
