//! csv-anon: pseudonymise one column of a CSV file.
//!
//! Each distinct value of the chosen column is replaced by a token of the
//! form `<field>_<ordinal>`, with ordinals handed out in order of first
//! appearance starting at 1. The value-to-token assignments are returned as a
//! [`ValueMap`] so they can be saved as a mapping file and later used to
//! restore the original data.
//!
//! # Example
//!
//! ```no_run
//! use csv_anon::{Anonymiser, AnonymiserConfig, CsvSource, mapping::mapping_path};
//!
//! let anonymiser = Anonymiser::with_config(
//!     AnonymiserConfig::default().with_output_path("out/anonymised_data.csv"),
//! );
//! let mut source = CsvSource::from_path("patients.csv", &anonymiser.config().input)?;
//! let values = anonymiser.anonymise(&mut source, "city")?;
//!
//! values.save(mapping_path("out", "city"), "city")?;
//! println!("Distinct values: {}", values.len());
//! # Ok::<(), csv_anon::AnonymiseError>(())
//! ```

pub mod error;
pub mod input;
pub mod mapping;

mod anonymiser;
mod restore;

pub use anonymiser::{Anonymiser, AnonymiserConfig, DEFAULT_OUTPUT_PATH, create_exclusive};
pub use error::{AnonymiseError, Result};
pub use input::{CsvSource, Header, InputConfig, read_header};
pub use mapping::{MappingEntry, MappingTable, ValueMap};
pub use restore::{DEFAULT_RESTORE_PATH, RestoreConfig, Restorer};
