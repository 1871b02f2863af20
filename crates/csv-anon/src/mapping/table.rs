//! Loaded mapping files, queryable in both directions.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;

use super::{MAPPING_HEADER, MappingEntry, ValueMap};
use crate::error::{AnonymiseError, Result};

/// A bidirectional original <-> token table read back from a mapping file.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    by_token: IndexMap<String, String>,
    by_original: IndexMap<String, String>,
}

impl MappingTable {
    /// Load a mapping file written by [`ValueMap::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AnonymiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(BufReader::new(file), &format!("'{}'", path.display()))
    }

    /// Read a mapping from any byte stream.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::parse(rdr, "reader")
    }

    /// Build the table a [`ValueMap`] would export for `field`.
    pub fn from_value_map(values: &ValueMap, field: &str) -> Self {
        let mut table = Self::default();
        for entry in values.entries(field) {
            table.by_original.insert(entry.original.clone(), entry.token.clone());
            table.by_token.insert(entry.token, entry.original);
        }
        table
    }

    fn parse<R: Read>(rdr: R, origin: &str) -> Result<Self> {
        let invalid = |message: String| AnonymiseError::Mapping {
            origin: origin.to_string(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|e| invalid(format!("unreadable header: {}", e)))?;
        if headers.iter().ne(MAPPING_HEADER) {
            return Err(invalid(format!(
                "expected header '{}', found '{}'",
                MAPPING_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut table = Self::default();
        for (idx, result) in reader.deserialize::<MappingEntry>().enumerate() {
            // Header is line 1.
            let line = idx + 2;
            let entry = result.map_err(|e| invalid(format!("line {}: {}", line, e)))?;

            if table.by_token.contains_key(&entry.token) {
                return Err(invalid(format!(
                    "line {}: duplicate token '{}'",
                    line, entry.token
                )));
            }
            if table.by_original.contains_key(&entry.original) {
                return Err(invalid(format!(
                    "line {}: value mapped more than once (token '{}')",
                    line, entry.token
                )));
            }

            table.by_original.insert(entry.original.clone(), entry.token.clone());
            table.by_token.insert(entry.token, entry.original);
        }

        Ok(table)
    }

    /// Original value behind `token`.
    pub fn original_for(&self, token: &str) -> Option<&str> {
        self.by_token.get(token).map(String::as_str)
    }

    /// Token assigned to `original`.
    pub fn token_for(&self, original: &str) -> Option<&str> {
        self.by_original.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// Entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = MappingEntry> + '_ {
        self.by_token.iter().map(|(token, original)| MappingEntry {
            original: original.clone(),
            token: token.clone(),
        })
    }
}
