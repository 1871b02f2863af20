//! Forward-only CSV row source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{StringRecord, Trim};

use super::header::Header;
use crate::error::{AnonymiseError, Result};

/// Input parsing configuration.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Trim surrounding whitespace from every cell, header included.
    pub trim: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: false,
        }
    }
}

impl InputConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Enable or disable whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn reader<R: Read>(&self, rdr: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .trim(if self.trim { Trim::All } else { Trim::None })
            // The header is pulled as an ordinary record so that it goes
            // through the same error path as data rows.
            .has_headers(false)
            // Row lengths are checked by the caller against the header.
            .flexible(true)
            .from_reader(rdr)
    }
}

/// A sequential, non-restartable producer of CSV rows.
///
/// The first row pulled with [`CsvSource::read_header`] is the header; every
/// later row is data. Rows are numbered from 1 in file order, so the first
/// data row is row 2.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    rows_read: u64,
}

impl CsvSource<File> {
    /// Open a file as a row source.
    pub fn from_path(path: impl AsRef<Path>, config: &InputConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AnonymiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_reader(file, config))
    }
}

impl<R: Read> CsvSource<R> {
    /// Wrap any byte stream as a row source.
    pub fn from_reader(rdr: R, config: &InputConfig) -> Self {
        Self {
            reader: config.reader(rdr),
            rows_read: 0,
        }
    }

    /// Pull the header row.
    pub fn read_header(&mut self) -> Result<Header> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                self.rows_read += 1;
                Ok(Header::from_record(&record))
            }
            Ok(false) => Err(AnonymiseError::EmptyInput),
            Err(e) => Err(AnonymiseError::Read(e)),
        }
    }

    /// Pull the next data row into `record`.
    ///
    /// Returns `Ok(false)` once the source is exhausted.
    pub fn next_row(&mut self, record: &mut StringRecord) -> Result<bool> {
        match self.reader.read_record(record) {
            Ok(true) => {
                self.rows_read += 1;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(source) => Err(AnonymiseError::RowRead {
                row: self.rows_read + 1,
                source,
            }),
        }
    }

    /// Number of rows pulled so far, header included.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

/// Read only the header row of a file.
pub fn read_header(path: impl AsRef<Path>, config: &InputConfig) -> Result<Header> {
    CsvSource::from_path(path, config)?.read_header()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_header_then_rows() {
        let data = "name,city\nAlice,NYC\nBob,LA\n";
        let mut source = CsvSource::from_reader(data.as_bytes(), &InputConfig::default());

        let header = source.read_header().unwrap();
        assert_eq!(header.columns(), ["name", "city"]);

        let mut record = StringRecord::new();
        assert!(source.next_row(&mut record).unwrap());
        assert_eq!(&record[0], "Alice");
        assert!(source.next_row(&mut record).unwrap());
        assert_eq!(&record[1], "LA");
        assert!(!source.next_row(&mut record).unwrap());
        assert_eq!(source.rows_read(), 3);
    }

    #[test]
    fn test_empty_input() {
        let mut source = CsvSource::from_reader("".as_bytes(), &InputConfig::default());
        assert!(matches!(
            source.read_header(),
            Err(AnonymiseError::EmptyInput)
        ));
    }

    #[test]
    fn test_quoted_fields() {
        let data = "id,note\n1,\"hello, world\"\n2,\"multi\nline\"\n";
        let mut source = CsvSource::from_reader(data.as_bytes(), &InputConfig::default());
        source.read_header().unwrap();

        let mut record = StringRecord::new();
        source.next_row(&mut record).unwrap();
        assert_eq!(&record[1], "hello, world");
        source.next_row(&mut record).unwrap();
        assert_eq!(&record[1], "multi\nline");
    }

    #[test]
    fn test_invalid_utf8_row_reports_row_number() {
        let mut data = b"a,b\n1,2\n".to_vec();
        data.extend_from_slice(b"3,\xff\n");
        let mut source = CsvSource::from_reader(data.as_slice(), &InputConfig::default());
        source.read_header().unwrap();

        let mut record = StringRecord::new();
        assert!(source.next_row(&mut record).unwrap());
        match source.next_row(&mut record) {
            Err(AnonymiseError::RowRead { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected RowRead, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_delimiter_and_trim() {
        let data = "name ; city\nAlice ; NYC\n";
        let config = InputConfig::default().with_delimiter(b';').with_trim(true);
        let mut source = CsvSource::from_reader(data.as_bytes(), &config);

        assert_eq!(source.read_header().unwrap().columns(), ["name", "city"]);
        let mut record = StringRecord::new();
        source.next_row(&mut record).unwrap();
        assert_eq!(&record[1], "NYC");
    }

    #[test]
    fn test_custom_quote() {
        let data = "id,note\n1,'a, b'\n";
        let config = InputConfig::default().with_quote(b'\'');
        let mut source = CsvSource::from_reader(data.as_bytes(), &config);
        source.read_header().unwrap();

        let mut record = StringRecord::new();
        source.next_row(&mut record).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(&record[1], "a, b");
    }
}
