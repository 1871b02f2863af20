//! Restore command - put original values back using a mapping file.

use std::path::PathBuf;

use colored::Colorize;
use csv_anon::{CsvSource, InputConfig, MappingTable, RestoreConfig, Restorer};
use tracing::info;

use crate::cli::Delimiter;

pub fn run(
    file: PathBuf,
    map: PathBuf,
    field: String,
    output: PathBuf,
    delimiter: Delimiter,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !map.exists() {
        return Err(format!("Mapping file not found: {}", map.display()).into());
    }

    let mapping = MappingTable::load(&map)?;
    info!(path = %map.display(), entries = mapping.len(), "loaded mapping");

    let config = RestoreConfig::default()
        .with_output_path(&output)
        .with_input(InputConfig::default().with_delimiter(delimiter.0));
    let restorer = Restorer::with_config(config);

    let mut source = CsvSource::from_path(&file, &restorer.config().input)?;
    let rows = restorer.restore(&mut source, &field, &mapping)?;

    println!(
        "{} {} rows of {}",
        "Restored".green().bold(),
        rows.to_string().white().bold(),
        field.cyan()
    );
    println!("  Data: {}", output.display());

    Ok(())
}
