//! Value-to-token mappings and their CSV persistence.

mod table;
mod value_map;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use table::MappingTable;
pub use value_map::ValueMap;

/// Column names of a mapping file.
pub const MAPPING_HEADER: [&str; 2] = ["OriginalValue", "NewValue"];

/// One row of a mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(rename = "OriginalValue")]
    pub original: String,
    #[serde(rename = "NewValue")]
    pub token: String,
}

/// Build the pseudonymous token for an ordinal, e.g. `city_2`.
pub fn token(field: &str, ordinal: u64) -> String {
    format!("{}_{}", field, ordinal)
}

/// Path of the mapping file for `field` inside `dir`.
///
/// # Example
///
/// ```
/// use csv_anon::mapping::mapping_path;
///
/// let path = mapping_path("out", "city");
/// assert_eq!(path.to_string_lossy(), "out/city_map.csv");
/// ```
pub fn mapping_path(dir: impl AsRef<Path>, field: &str) -> PathBuf {
    dir.as_ref().join(format!("{}_map.csv", field))
}
