//! Anonymise command - replace one column and write the mapping file.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use colored::Colorize;
use csv_anon::mapping::mapping_path;
use csv_anon::{Anonymiser, AnonymiserConfig, CsvSource, InputConfig, create_exclusive};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::AnonymiseArgs;

/// Machine-readable summary printed with `--json`.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    field: &'a str,
    distinct_values: usize,
    output: &'a Path,
    mapping: &'a Path,
}

pub fn run(
    file: &Path,
    field: &str,
    args: &AnonymiseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = AnonymiserConfig::default()
        .with_output_path(&args.output)
        .with_input(InputConfig::default().with_delimiter(args.delimiter.0));
    let anonymiser = Anonymiser::with_config(config);

    info!(file = %file.display(), field, "anonymising");
    let mut source = CsvSource::from_path(file, &anonymiser.config().input)?;

    // Claim the mapping file up front so a clash is reported before any
    // dataset is written.
    let map_path = mapping_path(&args.map_dir, field);
    let map_file = create_exclusive(&map_path)?;

    let values = match anonymiser.anonymise(&mut source, field) {
        Ok(values) => values,
        Err(e) => {
            drop(map_file);
            if let Err(rm) = fs::remove_file(&map_path) {
                warn!(
                    path = %map_path.display(),
                    error = %rm,
                    "could not remove empty mapping file"
                );
            }
            return Err(e.into());
        }
    };

    values.write_csv(BufWriter::new(map_file), field)?;
    info!(path = %map_path.display(), entries = values.len(), "wrote mapping");

    if args.json {
        let summary = RunSummary {
            field,
            distinct_values: values.len(),
            output: &args.output,
            mapping: &map_path,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} {} distinct values of {}",
            "Successfully anonymised".green().bold(),
            values.len().to_string().white().bold(),
            field.cyan()
        );
        println!("  Data:    {}", args.output.display());
        println!("  Mapping: {}", map_path.display());
    }

    Ok(())
}
