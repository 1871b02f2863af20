//! Header row and field resolution.

use csv::StringRecord;

/// Ordered column names taken from the first input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Create a header from column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub(crate) fn from_record(record: &StringRecord) -> Self {
        Self::new(record.iter().map(|s| s.to_string()).collect())
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of `field` in the header.
    ///
    /// Matching is exact. When a name appears more than once the leftmost
    /// column wins, so `a,b,a` resolves `a` to index 0.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == field)
    }
}
