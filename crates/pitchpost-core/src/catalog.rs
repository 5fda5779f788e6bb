//! Event catalog loading.
//!
//! The catalog is a JSON array of event records supplied in one batch per
//! session. Records are checked once here; everything downstream works on
//! typed [`Event`] values. Dates are deliberately not validated: a bad date
//! sends that record to the past bucket instead of failing the load.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::event::{Event, EventId};

/// An ordered, validated batch of events.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<Event>,
}

impl Catalog {
    /// Validate an already-deserialized batch.
    ///
    /// Only identifier uniqueness is enforced. A record with an out-of-range
    /// coordinate keeps its place in the catalog but loses the coordinate, so
    /// it drops out of proximity and the map without affecting anything else.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] when two records share an id.
    pub fn new(mut events: Vec<Event>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<EventId> = HashSet::with_capacity(events.len());
        for event in &mut events {
            if !seen.insert(event.id) {
                return Err(CatalogError::DuplicateId(event.id));
            }
            if let Some(c) = event.coordinates.filter(|c| !c.is_valid()) {
                tracing::warn!(
                    id = event.id,
                    latitude = c.latitude,
                    longitude = c.longitude,
                    "dropping out-of-range coordinate"
                );
                event.coordinates = None;
            }
        }
        Ok(Self { events })
    }

    /// Parse and validate a JSON catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::ParseFailed`] for malformed JSON or records
    /// that do not match the schema, plus any validation error from
    /// [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Self::new(events)
    }

    /// Read, parse and validate a catalog file.
    ///
    /// # Errors
    /// Returns [`CatalogError::ReadFailed`] if the file cannot be read, plus
    /// any error from [`Catalog::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), events = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
