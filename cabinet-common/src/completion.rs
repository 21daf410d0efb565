//! Completed-lesson persistence
//!
//! Completed lesson ids are stored as a JSON array of strings under two keys:
//! - [`PRIMARY_KEY`], read first
//! - [`LEGACY_KEY`], the slot older releases used; read when the primary slot
//!   is missing, blank, empty or malformed
//!
//! Every write updates both slots with the same deduplicated array so old and
//! new readers of one storage location agree.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;
use crate::Result;

/// Current storage slot
pub const PRIMARY_KEY: &str = "course_completed_lessons_v2";

/// Pre-migration storage slot, still written for compatibility
pub const LEGACY_KEY: &str = "course_completed_lessons_v1";

/// Set of completed lesson ids, kept in completion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionSet {
    ids: Vec<String>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, lesson_id: &str) -> bool {
        self.ids.iter().any(|id| id == lesson_id)
    }

    /// Add `lesson_id`; returns false if it was already present
    pub fn insert(&mut self, lesson_id: impl Into<String>) -> bool {
        let lesson_id = lesson_id.into();
        if self.contains(&lesson_id) {
            return false;
        }
        self.ids.push(lesson_id);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CompletionSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Completion set persisted in a [`KeyValueStore`]
///
/// Nothing is cached: each call goes back to the store.
pub struct CompletionStore<S> {
    store: S,
}

impl<S: KeyValueStore> CompletionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the completion set, primary slot first, then legacy
    ///
    /// Malformed stored data is logged and treated as no completions.
    pub fn load(&self) -> CompletionSet {
        if let Some(set) = self.read_slot(PRIMARY_KEY) {
            return set;
        }
        if let Some(set) = self.read_slot(LEGACY_KEY) {
            debug!("Loaded {} completions from legacy slot", set.len());
            return set;
        }
        CompletionSet::new()
    }

    /// Record `lesson_id` as completed and persist both slots
    ///
    /// Returns whether the id was newly added. Calling this twice leaves the
    /// same stored set as calling it once.
    pub fn mark_completed(&self, lesson_id: &str) -> Result<bool> {
        let mut completed = self.load();
        let added = completed.insert(lesson_id);
        self.save(&completed)?;

        if added {
            info!("Marked lesson '{}' completed ({} total)", lesson_id, completed.len());
        }
        Ok(added)
    }

    /// Clear both slots
    pub fn reset(&self) -> Result<()> {
        self.store.remove(PRIMARY_KEY)?;
        self.store.remove(LEGACY_KEY)?;
        info!("Completion progress reset");
        Ok(())
    }

    fn save(&self, completed: &CompletionSet) -> Result<()> {
        let json = serde_json::to_string(completed)?;
        self.store.set(PRIMARY_KEY, &json)?;
        self.store.set(LEGACY_KEY, &json)?;
        Ok(())
    }

    /// `None` when the slot is absent, blank, empty or not a string array
    fn read_slot(&self, key: &str) -> Option<CompletionSet> {
        let raw = self.store.get(key)?;
        if raw.trim().is_empty() {
            return None;
        }

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) if ids.is_empty() => None,
            Ok(ids) => Some(ids.into_iter().collect()),
            Err(e) => {
                warn!("Ignoring malformed completion data in '{}': {}", key, e);
                None
            }
        }
    }
}
