//! First-seen value to ordinal assignment.

use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;

use super::{MAPPING_HEADER, MappingEntry, token};
use crate::anonymiser::create_exclusive;
use crate::error::{AnonymiseError, Result};

/// Mapping from original cell value to a 1-based ordinal.
///
/// Entries are kept in the order their value was first seen and are never
/// updated once assigned, so iteration order and ordinal order agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMap {
    entries: IndexMap<String, u64>,
}

impl ValueMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ordinal for `value`, assigning the next one if unseen.
    pub fn assign(&mut self, value: &str) -> u64 {
        if let Some(&ordinal) = self.entries.get(value) {
            return ordinal;
        }
        let ordinal = self.entries.len() as u64 + 1;
        self.entries.insert(value.to_string(), ordinal);
        ordinal
    }

    /// Ordinal assigned to `value`, if any.
    pub fn get(&self, value: &str) -> Option<u64> {
        self.entries.get(value).copied()
    }

    /// Token assigned to `value` under `field`, if any.
    pub fn token_for(&self, field: &str, value: &str) -> Option<String> {
        self.get(value).map(|ordinal| token(field, ordinal))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(value, ordinal)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(v, &o)| (v.as_str(), o))
    }

    /// Mapping file rows for `field` in first-seen order.
    pub fn entries(&self, field: &str) -> impl Iterator<Item = MappingEntry> + '_ {
        let field = field.to_string();
        self.iter().map(move |(value, ordinal)| MappingEntry {
            original: value.to_string(),
            token: token(&field, ordinal),
        })
    }

    /// Write the mapping as CSV: an `OriginalValue,NewValue` header, then one
    /// row per distinct value.
    ///
    /// The header is written even when the map is empty.
    pub fn write_csv<W: Write>(&self, writer: W, field: &str) -> Result<()> {
        let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

        csv.write_record(MAPPING_HEADER).map_err(AnonymiseError::Write)?;
        for entry in self.entries(field) {
            csv.serialize(&entry).map_err(AnonymiseError::Write)?;
        }
        csv.flush().map_err(|e| AnonymiseError::Write(e.into()))?;

        Ok(())
    }

    /// Save the mapping to a new file.
    ///
    /// Fails with [`AnonymiseError::OutputAlreadyExists`] rather than replace
    /// a mapping that is already on disk.
    pub fn save(&self, path: impl AsRef<Path>, field: &str) -> Result<()> {
        let file = create_exclusive(path.as_ref())?;
        self.write_csv(BufWriter::new(file), field)
    }
}
