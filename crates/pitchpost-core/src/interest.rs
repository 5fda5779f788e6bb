//! Viewer-local interest labels.
//!
//! Two independent label sets, "applied" and "to apply", each holding event
//! identifiers. An event can sit in neither, either, or both. Each set is
//! persisted as one JSON array under a well-known key and rewritten in full
//! on every toggle.
//!
//! # Invariants
//! - Toggling one label never touches the other.
//! - Toggling twice restores the original membership.
//! - Unreadable persisted state loads as an empty set; it is never fatal.
//! - Identifiers for events that left the catalog are kept as-is.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::event::EventId;
use crate::storage::Database;

/// Which label set an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestLabel {
    Applied,
    ToApply,
}

impl InterestLabel {
    pub const ALL: [InterestLabel; 2] = [InterestLabel::Applied, InterestLabel::ToApply];

    /// Persistence key for this label's set.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::ToApply => "toApply",
        }
    }
}

impl fmt::Display for InterestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InterestLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "applied" => Ok(Self::Applied),
            "toApply" | "to-apply" | "to_apply" => Ok(Self::ToApply),
            other => Err(format!("unknown label '{other}' (expected applied or to-apply)")),
        }
    }
}

/// Key-value persistence underneath an [`InterestStore`].
pub trait InterestBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl InterestBackend for Database {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.kv_get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.kv_set(key, value)
    }
}

/// Non-persistent backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw value, e.g. to simulate state left by an older session.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl InterestBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read-only view of interest labels, as consumed by the board.
pub trait InterestLookup {
    fn has_label(&self, id: EventId, label: InterestLabel) -> bool;
}

#[derive(Debug, Default)]
struct LabelSets {
    applied: IndexSet<EventId>,
    to_apply: IndexSet<EventId>,
}

impl LabelSets {
    fn get(&self, label: InterestLabel) -> &IndexSet<EventId> {
        match label {
            InterestLabel::Applied => &self.applied,
            InterestLabel::ToApply => &self.to_apply,
        }
    }

    fn get_mut(&mut self, label: InterestLabel) -> &mut IndexSet<EventId> {
        match label {
            InterestLabel::Applied => &mut self.applied,
            InterestLabel::ToApply => &mut self.to_apply,
        }
    }
}

/// Persisted label sets with toggle and membership queries.
///
/// State is read once in [`InterestStore::open`]. Toggles are serialized
/// through an internal lock, so the read-modify-write of one toggle never
/// interleaves with another.
pub struct InterestStore<B: InterestBackend> {
    backend: B,
    sets: Mutex<LabelSets>,
}

impl<B: InterestBackend> InterestStore<B> {
    /// Load both label sets from `backend`.
    pub fn open(backend: B) -> Self {
        let sets = LabelSets {
            applied: read_label(&backend, InterestLabel::Applied),
            to_apply: read_label(&backend, InterestLabel::ToApply),
        };
        tracing::debug!(
            applied = sets.applied.len(),
            to_apply = sets.to_apply.len(),
            "interest labels loaded"
        );
        Self {
            backend,
            sets: Mutex::new(sets),
        }
    }

    pub fn contains(&self, id: EventId, label: InterestLabel) -> bool {
        self.lock().get(label).contains(&id)
    }

    /// Flip membership of `id` in `label` and persist that label's set.
    ///
    /// Returns the new membership. If persisting fails the in-memory set
    /// is left unchanged.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend rejects the write.
    pub fn toggle(&self, id: EventId, label: InterestLabel) -> Result<bool, StoreError> {
        let mut sets = self.lock();
        let mut next = sets.get(label).clone();
        let now_present = if next.shift_remove(&id) {
            false
        } else {
            next.insert(id);
            true
        };

        let encoded = serde_json::to_string(&next)?;
        self.backend.save(label.key(), &encoded)?;
        *sets.get_mut(label) = next;

        tracing::debug!(id, label = label.key(), now_present, "interest label toggled");
        Ok(now_present)
    }

    /// Identifiers carrying `label`, in the order they were first added.
    pub fn ids(&self, label: InterestLabel) -> Vec<EventId> {
        self.lock().get(label).iter().copied().collect()
    }

    /// Labels currently attached to `id`.
    pub fn labels_for(&self, id: EventId) -> Vec<InterestLabel> {
        let sets = self.lock();
        InterestLabel::ALL
            .into_iter()
            .filter(|label| sets.get(*label).contains(&id))
            .collect()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LabelSets> {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: InterestBackend> InterestLookup for InterestStore<B> {
    fn has_label(&self, id: EventId, label: InterestLabel) -> bool {
        self.contains(id, label)
    }
}

fn read_label<B: InterestBackend>(backend: &B, label: InterestLabel) -> IndexSet<EventId> {
    let raw = match backend.load(label.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return IndexSet::new(),
        Err(err) => {
            tracing::warn!(key = label.key(), error = %err, "could not read interest labels; starting empty");
            return IndexSet::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(key = label.key(), error = %err, "corrupt interest labels; starting empty");
        IndexSet::new()
    })
}
