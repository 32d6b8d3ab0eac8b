//! Two-slot launch history with last-used timestamps

use crate::error::Result;
use std::collections::BTreeMap;
use switchback_store::KeyValueStore;

pub const LAST_PACKAGE_KEY: &str = "lastPackage";
pub const PREVIOUS_PACKAGE_KEY: &str = "previousPackage";
pub const LAST_USED_KEY: &str = "lastUsedTimes";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSnapshot {
    pub last: Option<String>,
    pub previous: Option<String>,
}

/// View over the persisted `last`/`previous` pair.
///
/// `previous` only moves when a different package supersedes `last`, which
/// gives alternate-toggle behaviour between two packages.
pub struct LaunchHistory<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> LaunchHistory<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn record_launch(&mut self, package_id: &str) -> Result<()> {
        if package_id.is_empty() {
            return Ok(());
        }

        let superseded = self.last()?;
        if superseded.as_deref() == Some(package_id) {
            return Ok(());
        }
        // last goes first: a failed second put leaves previous stale, never equal to last
        self.store.put(LAST_PACKAGE_KEY, package_id.into())?;
        if let Some(last) = superseded {
            self.store.put(PREVIOUS_PACKAGE_KEY, last.into())?;
        }
        Ok(())
    }

    pub fn last(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_text(LAST_PACKAGE_KEY)?
            .filter(|p| !p.is_empty()))
    }

    pub fn previous(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_text(PREVIOUS_PACKAGE_KEY)?
            .filter(|p| !p.is_empty()))
    }

    pub fn snapshot(&self) -> Result<LaunchSnapshot> {
        Ok(LaunchSnapshot {
            last: self.last()?,
            previous: self.previous()?,
        })
    }

    pub fn record_last_used(&mut self, package_id: &str, at: i64) -> Result<()> {
        let mut times = self.last_used_times()?;
        times.insert(package_id.to_string(), at);
        self.store.put(LAST_USED_KEY, times.into())?;
        Ok(())
    }

    pub fn last_used_at(&self, package_id: &str) -> Result<Option<i64>> {
        Ok(self.last_used_times()?.get(package_id).copied())
    }

    pub fn last_used_times(&self) -> Result<BTreeMap<String, i64>> {
        Ok(self.store.get_timestamps(LAST_USED_KEY)?.unwrap_or_default())
    }
}
