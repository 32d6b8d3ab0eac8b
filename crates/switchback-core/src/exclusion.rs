//! Persistent exclusion set

use crate::error::Result;
use std::collections::BTreeSet;
use switchback_store::KeyValueStore;

pub const EXCLUDED_APPS_KEY: &str = "excludedApps";

pub type ExclusionSet = BTreeSet<String>;

/// View over the persisted block-set.
///
/// The first read with nothing persisted writes the default set, so the seed
/// happens exactly once. Every mutation rewrites the whole set.
pub struct ExclusionFilter<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
    defaults: &'a [String],
}

impl<'a, S: KeyValueStore + ?Sized> ExclusionFilter<'a, S> {
    pub fn new(store: &'a mut S, defaults: &'a [String]) -> Self {
        Self { store, defaults }
    }

    /// Owned copy of the current set
    pub fn all(&mut self) -> Result<ExclusionSet> {
        if let Some(set) = self.store.get_set(EXCLUDED_APPS_KEY)? {
            return Ok(set);
        }

        let seeded: ExclusionSet = self.defaults.iter().cloned().collect();
        self.store.put(EXCLUDED_APPS_KEY, seeded.clone().into())?;
        tracing::info!(count = seeded.len(), "seeded default exclusions");
        Ok(seeded)
    }

    pub fn is_excluded(&mut self, package_id: &str) -> Result<bool> {
        Ok(self.all()?.contains(package_id))
    }

    /// Returns true if the package was not excluded before
    pub fn add(&mut self, package_id: &str) -> Result<bool> {
        let mut set = self.all()?;
        if !set.insert(package_id.to_string()) {
            return Ok(false);
        }
        self.store.put(EXCLUDED_APPS_KEY, set.into())?;
        tracing::debug!(package = package_id, "excluded package");
        Ok(true)
    }

    /// Returns true if the package was excluded before
    pub fn remove(&mut self, package_id: &str) -> Result<bool> {
        let mut set = self.all()?;
        if !set.remove(package_id) {
            return Ok(false);
        }
        self.store.put(EXCLUDED_APPS_KEY, set.into())?;
        tracing::debug!(package = package_id, "included package");
        Ok(true)
    }
}
