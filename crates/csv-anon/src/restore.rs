//! Reversing an anonymisation pass with its mapping file.

use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use csv::StringRecord;
use tracing::{debug, info};

use crate::anonymiser::{check_length, create_exclusive, resolve_field};
use crate::error::{AnonymiseError, Result};
use crate::input::{CsvSource, Header, InputConfig};
use crate::mapping::MappingTable;

/// Default name of a restored dataset.
pub const DEFAULT_RESTORE_PATH: &str = "restored_data.csv";

/// Configuration for restoring original values.
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    /// Where the restored dataset is written. Must not exist yet.
    pub output_path: PathBuf,
    /// Input parsing configuration.
    pub input: InputConfig,
    /// Delimiter for the restored dataset.
    pub output_delimiter: u8,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_RESTORE_PATH),
            input: InputConfig::default(),
            output_delimiter: b',',
        }
    }
}

impl RestoreConfig {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    pub fn with_output_delimiter(mut self, delimiter: u8) -> Self {
        self.output_delimiter = delimiter;
        self
    }
}

/// Replaces tokens in an anonymised dataset with their original values.
#[derive(Debug, Clone, Default)]
pub struct Restorer {
    config: RestoreConfig,
}

impl Restorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RestoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RestoreConfig {
        &self.config
    }

    /// Restore `field` into the configured output file.
    ///
    /// Returns the number of data rows written.
    pub fn restore<R: Read>(
        &self,
        source: &mut CsvSource<R>,
        field: &str,
        mapping: &MappingTable,
    ) -> Result<u64> {
        let header = source.read_header()?;
        let index = resolve_field(&header, field)?;

        let file = create_exclusive(&self.config.output_path)?;
        debug!(path = %self.config.output_path.display(), "created restore output");

        self.run(source, &header, index, mapping, BufWriter::new(file))
    }

    /// Restore `field` into an arbitrary writer.
    pub fn restore_to_writer<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        writer: W,
        field: &str,
        mapping: &MappingTable,
    ) -> Result<u64> {
        let header = source.read_header()?;
        let index = resolve_field(&header, field)?;

        self.run(source, &header, index, mapping, writer)
    }

    fn run<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        header: &Header,
        index: usize,
        mapping: &MappingTable,
        writer: W,
    ) -> Result<u64> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(self.config.output_delimiter)
            .has_headers(false)
            .from_writer(writer);

        out.write_record(header.columns()).map_err(AnonymiseError::Write)?;

        let mut record = StringRecord::new();
        let mut row = StringRecord::new();
        let mut rows = 0u64;

        while source.next_row(&mut record)? {
            let line = source.rows_read();
            check_length(header, &record, line)?;

            let token = &record[index];
            let original = mapping
                .original_for(token)
                .ok_or_else(|| AnonymiseError::UnknownToken {
                    row: line,
                    token: token.to_string(),
                })?;

            row.clear();
            for (i, cell) in record.iter().enumerate() {
                row.push_field(if i == index { original } else { cell });
            }
            out.write_record(&row).map_err(AnonymiseError::Write)?;
            rows += 1;
        }

        out.flush().map_err(|e| AnonymiseError::Write(e.into()))?;

        info!(rows, "restore complete");
        Ok(rows)
    }
}
