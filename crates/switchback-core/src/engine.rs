//! Switch-back orchestration over the provider, store and launcher

use crate::config::Config;
use crate::error::{Result, SwitchError};
use crate::exclusion::{ExclusionFilter, ExclusionSet};
use crate::history::{OrderedHistory, RecentApps};
use crate::ingest::{Ingestor, UsageDataProvider};
use crate::launch::LaunchHistory;
use crate::launcher::{LaunchHandle, PackageLauncher};
use crate::policy::{Preset, SelectionPolicy, SelectionSources, TieBreak};
use crate::window_log::WindowChangeLog;
use switchback_store::KeyValueStore;

/// Where a switch target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOrigin {
    Policy,
    PreviousLaunch,
    LastLaunch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchTarget {
    pub package: String,
    pub origin: TargetOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Launched {
        target: SwitchTarget,
        handle: LaunchHandle,
    },
    /// Policy and launch history were both empty
    NoTarget { permission_required: bool },
    /// A target was found but no launcher entry point exists for it
    Unlaunchable { package: String },
}

impl SwitchOutcome {
    /// Text suitable for showing to the user
    pub fn message(&self) -> String {
        match self {
            SwitchOutcome::Launched { target, .. } => format!("Switched to {}", target.package),
            SwitchOutcome::NoTarget {
                permission_required: true,
            } => "No recent app found. Grant usage access to enable switching.".to_string(),
            SwitchOutcome::NoTarget { .. } => "No recent app to switch to".to_string(),
            SwitchOutcome::Unlaunchable { package } => format!("{} cannot be launched", package),
        }
    }
}

pub struct Engine<P, S> {
    config: Config,
    provider: P,
    store: S,
    window_log: WindowChangeLog,
    recent: RecentApps,
}

impl<P: UsageDataProvider, S: KeyValueStore> Engine<P, S> {
    pub fn new(config: Config, provider: P, store: S) -> Self {
        Self {
            config,
            provider,
            store,
            window_log: WindowChangeLog::new(),
            recent: RecentApps::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_usage_access(&self) -> bool {
        self.provider.has_usage_access()
    }

    pub fn exclusions(&mut self) -> ExclusionFilter<'_, S> {
        ExclusionFilter::new(&mut self.store, &self.config.default_exclusions)
    }

    pub fn launch_history(&mut self) -> LaunchHistory<'_, S> {
        LaunchHistory::new(&mut self.store)
    }

    /// Feed a foreground window change observed by the automation host
    pub fn record_window_change(&mut self, package_id: &str, at: i64) {
        if package_id == self.config.self_package {
            return;
        }
        self.window_log.record(package_id, at);
    }

    /// Recently used packages, most recent first, without the host package
    /// and without excluded packages
    pub fn recent_apps(&mut self, now: i64) -> Result<Vec<String>> {
        let begin = now.saturating_sub(self.config.history_window_ms());
        let events = Ingestor::new(&self.provider).events(begin, now);
        let mut history =
            OrderedHistory::from_observations(&events, Some(self.config.self_package.as_str()));

        let excluded = self.exclusions().all()?;
        history.retain(|p| !excluded.contains(p));
        Ok(history.most_recent_first())
    }

    /// Rebuild the recently-used list. Returns true only if it changed.
    pub fn refresh(&mut self, now: i64) -> Result<bool> {
        let next = self.recent_apps(now)?;
        let changed = self.recent.update(next);
        if changed {
            tracing::debug!(count = self.recent.packages().len(), "recent apps changed");
        }
        Ok(changed)
    }

    /// List as of the last [`Engine::refresh`]
    pub fn recent(&self) -> &[String] {
        self.recent.packages()
    }

    /// Unfiltered ordering for troubleshooting data completeness. Never used
    /// to pick a switch target.
    pub fn diagnostic_list(&self, now: i64) -> Vec<String> {
        let begin = now.saturating_sub(Preset::Diagnostic.policy().window_ms());
        let events = Ingestor::new(&self.provider).events(begin, now);
        OrderedHistory::from_observations(&events, None).most_recent_first()
    }

    pub fn select_target(&mut self, policy: &SelectionPolicy, now: i64) -> Result<Option<String>> {
        let excluded = if policy.tie_break == TieBreak::NoFilter {
            ExclusionSet::new()
        } else {
            self.exclusions().all()?
        };

        let sources = SelectionSources {
            ingestor: Ingestor::new(&self.provider),
            window_log: &self.window_log,
            self_package: &self.config.self_package,
        };
        Ok(policy.select(&sources, &excluded, now))
    }

    /// Policy result, else the previous launch, else the last launch
    pub fn resolve_target(
        &mut self,
        policy: &SelectionPolicy,
        now: i64,
    ) -> Result<Option<SwitchTarget>> {
        if let Some(package) = self.select_target(policy, now)? {
            return Ok(Some(SwitchTarget {
                package,
                origin: TargetOrigin::Policy,
            }));
        }

        let snapshot = self.launch_history().snapshot()?;
        let fallback = snapshot
            .previous
            .map(|package| SwitchTarget {
                package,
                origin: TargetOrigin::PreviousLaunch,
            })
            .or_else(|| {
                snapshot.last.map(|package| SwitchTarget {
                    package,
                    origin: TargetOrigin::LastLaunch,
                })
            });

        if let Some(target) = &fallback {
            tracing::debug!(package = %target.package, origin = ?target.origin, "policy empty, using launch history");
        }
        Ok(fallback)
    }

    pub fn switch_back<L: PackageLauncher + ?Sized>(
        &mut self,
        launcher: &mut L,
        policy: &SelectionPolicy,
        now: i64,
    ) -> Result<SwitchOutcome> {
        let Some(target) = self.resolve_target(policy, now)? else {
            let permission_required = !self.has_usage_access();
            if permission_required {
                tracing::warn!("usage access not granted");
            }
            return Ok(SwitchOutcome::NoTarget {
                permission_required,
            });
        };

        match self.launch(launcher, &target.package, now) {
            Ok(handle) => Ok(SwitchOutcome::Launched { target, handle }),
            Err(SwitchError::LaunchUnresolvable(package)) => {
                Ok(SwitchOutcome::Unlaunchable { package })
            }
            Err(e) => Err(e),
        }
    }

    /// Launch a package explicitly and record it in the launch history
    pub fn launch<L: PackageLauncher + ?Sized>(
        &mut self,
        launcher: &mut L,
        package_id: &str,
        now: i64,
    ) -> Result<LaunchHandle> {
        let handle = match launcher.resolve_launch_target(package_id) {
            Some(handle) => handle,
            None if is_settings_like(package_id) => LaunchHandle::SystemSettings,
            None => return Err(SwitchError::LaunchUnresolvable(package_id.to_string())),
        };

        launcher
            .launch(&handle)
            .map_err(|message| SwitchError::Launch {
                package: package_id.to_string(),
                message,
            })?;

        let mut history = self.launch_history();
        history.record_launch(package_id)?;
        history.record_last_used(package_id, now)?;

        tracing::info!(package = package_id, handle = ?handle, "launched");
        Ok(handle)
    }
}

fn is_settings_like(package_id: &str) -> bool {
    package_id.to_ascii_lowercase().contains("settings")
}
