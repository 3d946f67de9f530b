//! Identity registry - canonical name to stable identifier mapping
//!
//! Loaded once per enrichment run from a CSV source with `name` and `id`
//! columns. Load order is preserved because it defines the tie-break order
//! during resolution.

use crate::error::{EnrichError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One canonical identity: display name plus its stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub name: String,
    pub id: String,
}

/// Ordered registry of canonical identities.
///
/// Immutable for the duration of a run. Duplicate names are collapsed while
/// loading: the id of the last occurrence wins, the position of the first
/// occurrence is kept.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    entries: Vec<IdentityRecord>,
    by_name: HashMap<String, usize>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from CSV text with `name` and `id` columns.
    /// Additional columns are ignored.
    pub fn from_csv(csv_text: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let mut registry = Self::new();
        for result in rdr.deserialize::<IdentityRecord>() {
            let record = result?;
            if record.name.is_empty() {
                continue;
            }
            registry.insert(record);
        }

        if registry.is_empty() {
            return Err(EnrichError::Registry(
                "registry source contains no usable entries".to_string(),
            ));
        }

        Ok(registry)
    }

    pub fn insert(&mut self, record: IdentityRecord) {
        match self.by_name.get(&record.name) {
            Some(&idx) => self.entries[idx].id = record.id,
            None => {
                self.by_name.insert(record.name.clone(), self.entries.len());
                self.entries.push(record);
            }
        }
    }

    /// Entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &IdentityRecord> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|&idx| self.entries[idx].id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
