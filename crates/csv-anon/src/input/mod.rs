//! Input parsing and header handling.

mod header;
mod reader;

pub use header::Header;
pub use reader::{CsvSource, InputConfig, read_header};
