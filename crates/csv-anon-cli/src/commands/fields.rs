//! Fields command - list the header of a CSV file.

use std::path::Path;

use csv_anon::{InputConfig, read_header};

use crate::cli::Delimiter;

pub fn run(file: &Path, delimiter: Delimiter) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let header = read_header(file, &InputConfig::default().with_delimiter(delimiter.0))?;

    println!("The available fields are:");
    for field in header.columns() {
        println!("{}", field);
    }

    Ok(())
}
