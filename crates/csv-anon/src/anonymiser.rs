//! The anonymisation pass.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{AnonymiseError, Result};
use crate::input::{CsvSource, Header, InputConfig};
use crate::mapping::{ValueMap, token};

/// Default name of the anonymised dataset.
pub const DEFAULT_OUTPUT_PATH: &str = "anonymised_data.csv";

/// Configuration for an anonymisation pass.
#[derive(Debug, Clone)]
pub struct AnonymiserConfig {
    /// Where the anonymised dataset is written. Must not exist yet.
    pub output_path: PathBuf,
    /// Input parsing configuration.
    pub input: InputConfig,
    /// Delimiter for the anonymised dataset.
    pub output_delimiter: u8,
}

impl Default for AnonymiserConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            input: InputConfig::default(),
            output_delimiter: b',',
        }
    }
}

impl AnonymiserConfig {
    /// Set the output path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the input configuration.
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Set the output delimiter.
    pub fn with_output_delimiter(mut self, delimiter: u8) -> Self {
        self.output_delimiter = delimiter;
        self
    }
}

/// Replaces each distinct value of one column with a `<field>_<ordinal>` token.
///
/// # Example
///
/// ```no_run
/// use csv_anon::{Anonymiser, CsvSource};
///
/// let anonymiser = Anonymiser::new();
/// let mut source = CsvSource::from_path("people.csv", &anonymiser.config().input)?;
/// let values = anonymiser.anonymise(&mut source, "city")?;
/// values.save("city_map.csv", "city")?;
/// # Ok::<(), csv_anon::AnonymiseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Anonymiser {
    config: AnonymiserConfig,
}

impl Anonymiser {
    /// Create an anonymiser writing to `anonymised_data.csv`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anonymiser with custom configuration.
    pub fn with_config(config: AnonymiserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnonymiserConfig {
        &self.config
    }

    /// Anonymise `field` from `source` into the configured output file.
    ///
    /// The header is read and `field` resolved before the output file is
    /// touched, so an unknown field leaves nothing on disk. The output is
    /// created exclusively; if it already exists the pass fails with
    /// [`AnonymiseError::OutputAlreadyExists`] before any data row is read.
    /// A failure mid-pass leaves the rows written so far on disk.
    pub fn anonymise<R: Read>(&self, source: &mut CsvSource<R>, field: &str) -> Result<ValueMap> {
        let header = source.read_header()?;
        let index = resolve_field(&header, field)?;

        let file = create_exclusive(&self.config.output_path)?;
        debug!(path = %self.config.output_path.display(), "created output file");

        self.run(source, &header, index, field, BufWriter::new(file))
    }

    /// Anonymise `field` from `source` into an arbitrary writer.
    pub fn anonymise_to_writer<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        writer: W,
        field: &str,
    ) -> Result<ValueMap> {
        let header = source.read_header()?;
        let index = resolve_field(&header, field)?;

        self.run(source, &header, index, field, writer)
    }

    fn run<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        header: &Header,
        index: usize,
        field: &str,
        writer: W,
    ) -> Result<ValueMap> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(self.config.output_delimiter)
            .has_headers(false)
            .from_writer(writer);

        out.write_record(header.columns()).map_err(AnonymiseError::Write)?;

        let mut values = ValueMap::new();
        let mut record = StringRecord::new();
        let mut row = StringRecord::new();

        while source.next_row(&mut record)? {
            check_length(header, &record, source.rows_read())?;

            let ordinal = values.assign(&record[index]);
            let replacement = token(field, ordinal);

            row.clear();
            for (i, cell) in record.iter().enumerate() {
                row.push_field(if i == index { replacement.as_str() } else { cell });
            }

            out.write_record(&row).map_err(AnonymiseError::Write)?;
        }

        out.flush().map_err(|e| AnonymiseError::Write(e.into()))?;

        info!(
            field,
            rows = source.rows_read().saturating_sub(1),
            distinct = values.len(),
            "anonymisation pass complete"
        );

        Ok(values)
    }
}

/// Resolve `field` to its column index, leftmost match first.
pub(crate) fn resolve_field(header: &Header, field: &str) -> Result<usize> {
    let index = header
        .position(field)
        .ok_or_else(|| AnonymiseError::FieldNotFound {
            field: field.to_string(),
        })?;
    debug!(field, index, columns = header.len(), "resolved field");
    Ok(index)
}

pub(crate) fn check_length(header: &Header, record: &StringRecord, row: u64) -> Result<()> {
    if record.len() != header.len() {
        return Err(AnonymiseError::RowLength {
            row,
            expected: header.len(),
            found: record.len(),
        });
    }
    Ok(())
}

/// Create `path` only if nothing is there yet.
///
/// Fails with [`AnonymiseError::OutputAlreadyExists`] when something is
/// already at `path`, and with [`AnonymiseError::Io`] for any other error.
pub fn create_exclusive(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => AnonymiseError::OutputAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => AnonymiseError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymise_str(data: &str, field: &str) -> Result<(ValueMap, String)> {
        let mut source = CsvSource::from_reader(data.as_bytes(), &InputConfig::default());
        let mut out = Vec::new();
        let values = Anonymiser::new().anonymise_to_writer(&mut source, &mut out, field)?;
        Ok((values, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_city_scenario() {
        let (values, out) =
            anonymise_str("name,city\nAlice,NYC\nBob,LA\nCarol,NYC\n", "city").unwrap();

        assert_eq!(values.iter().collect::<Vec<_>>(), vec![("NYC", 1), ("LA", 2)]);
        assert_eq!(out, "name,city\nAlice,city_1\nBob,city_2\nCarol,city_1\n");
    }

    #[test]
    fn test_header_only() {
        let (values, out) = anonymise_str("name,city\n", "city").unwrap();
        assert!(values.is_empty());
        assert_eq!(out, "name,city\n");
    }

    #[test]
    fn test_field_not_found() {
        let err = anonymise_str("name,city\nAlice,NYC\n", "email").unwrap_err();
        assert!(matches!(err, AnonymiseError::FieldNotFound { field } if field == "email"));
    }

    #[test]
    fn test_empty_input() {
        let err = anonymise_str("", "city").unwrap_err();
        assert!(matches!(err, AnonymiseError::EmptyInput));
    }

    #[test]
    fn test_duplicate_header_uses_first_column() {
        let (_, out) = anonymise_str("a,b,a\nx,y,z\n", "a").unwrap();
        assert_eq!(out, "a,b,a\na_1,y,z\n");
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = anonymise_str("a,b,c\n1,2,3\n4,5\n", "c").unwrap_err();
        match err {
            AnonymiseError::RowLength { row, expected, found } => {
                assert_eq!((row, expected, found), (3, 3, 2));
            }
            other => panic!("expected RowLength, got {:?}", other),
        }
    }

    #[test]
    fn test_long_row_is_rejected() {
        let err = anonymise_str("a,b\n1,2,3\n", "a").unwrap_err();
        assert!(matches!(err, AnonymiseError::RowLength { row: 2, .. }));
    }

    #[test]
    fn test_quoted_values_survive() {
        let (values, out) =
            anonymise_str("id,name\n1,\"Smith, J\"\n2,\"Smith, J\"\n", "name").unwrap();
        assert_eq!(values.get("Smith, J"), Some(1));
        assert_eq!(out, "id,name\n1,name_1\n2,name_1\n");

        let (_, out) = anonymise_str("id,name\n1,\"a\nb\"\n", "id").unwrap();
        assert_eq!(out, "id,name\nid_1,\"a\nb\"\n");
    }

    #[test]
    fn test_empty_cell_gets_a_token() {
        let (values, out) = anonymise_str("k,v\n1,\n2,x\n3,\n", "v").unwrap();
        assert_eq!(values.get(""), Some(1));
        assert_eq!(out, "k,v\n1,v_1\n2,v_2\n3,v_1\n");
    }

    #[test]
    fn test_output_delimiter() {
        let config = AnonymiserConfig::default().with_output_delimiter(b'\t');
        let mut source =
            CsvSource::from_reader("a,b\n1,2\n".as_bytes(), &InputConfig::default());
        let mut out = Vec::new();
        Anonymiser::with_config(config)
            .anonymise_to_writer(&mut source, &mut out, "b")
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\tb\n1\tb_1\n");
    }

    /// Accepts nothing; every write fails.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_writer_is_a_write_error() {
        let mut source =
            CsvSource::from_reader("name,city\nAlice,NYC\n".as_bytes(), &InputConfig::default());
        let err = Anonymiser::new()
            .anonymise_to_writer(&mut source, FullDisk, "city")
            .unwrap_err();
        assert!(matches!(err, AnonymiseError::Write(_)), "got {:?}", err);
    }

    #[test]
    fn test_invalid_utf8_header_is_a_read_error() {
        let mut source = CsvSource::from_reader(&b"a,\xff\n1,2\n"[..], &InputConfig::default());
        let err = Anonymiser::new()
            .anonymise_to_writer(&mut source, Vec::new(), "a")
            .unwrap_err();
        assert!(matches!(err, AnonymiseError::Read(_)), "got {:?}", err);
    }

    #[test]
    fn test_invalid_utf8_row_stops_the_pass() {
        let mut source =
            CsvSource::from_reader(&b"a,b\n1,2\n3,\xff\n5,6\n"[..], &InputConfig::default());
        let mut out = Vec::new();
        let err = Anonymiser::new()
            .anonymise_to_writer(&mut source, &mut out, "a")
            .unwrap_err();

        match err {
            AnonymiseError::RowRead { row, .. } => assert_eq!(row, 3),
            other => panic!("expected RowRead, got {:?}", other),
        }
        // Rows before the bad one are already handed to the writer.
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\na_1,2\n");
    }

    #[test]
    fn test_create_exclusive_refuses_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("taken.csv");
        std::fs::write(&path, "keep\n").unwrap();

        let err = create_exclusive(&path).unwrap_err();
        assert!(matches!(err, AnonymiseError::OutputAlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\n");

        let err = create_exclusive(&dir.path().join("missing").join("x.csv")).unwrap_err();
        assert!(matches!(err, AnonymiseError::Io { .. }));
    }
}
