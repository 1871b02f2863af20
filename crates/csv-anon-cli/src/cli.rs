//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{ArgAction, Args, Parser, Subcommand};
use csv_anon::{DEFAULT_OUTPUT_PATH, DEFAULT_RESTORE_PATH};

use crate::logging::LogFormat;

/// csv-anon: replace a CSV column with pseudonymous tokens
///
/// Each distinct value of FIELD becomes `<FIELD>_<n>`, numbered by first
/// appearance. The anonymised data and a `<FIELD>_map.csv` mapping file are
/// written; the mapping can later be used with `restore`.
#[derive(Parser)]
#[command(name = "csv-anon")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub anonymise: AnonymiseArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: LogFormat,
}

#[derive(Args)]
pub struct AnonymiseArgs {
    /// A CSV file to parse
    // Empty paths get through clap so they hit the usage message.
    #[arg(
        short,
        long,
        value_name = "FILE",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub file: Option<PathBuf>,

    /// Name of the field to anonymise (omit to list the available fields)
    #[arg(long, value_name = "FIELD")]
    pub field: Option<String>,

    /// Output path for the anonymised data
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Directory for the <FIELD>_map.csv mapping file
    #[arg(long, default_value = ".")]
    pub map_dir: PathBuf,

    /// Input field delimiter (a single character, or "tab")
    #[arg(short, long, default_value = ",")]
    pub delimiter: Delimiter,

    /// Print a JSON summary instead of a message
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restore original values using a mapping file
    Restore {
        /// Path to the anonymised CSV file
        #[arg(value_name = "ANONYMISED_FILE")]
        file: PathBuf,

        /// Path to the <FIELD>_map.csv mapping file
        #[arg(short, long)]
        map: PathBuf,

        /// Name of the anonymised field
        #[arg(long)]
        field: String,

        /// Output path for the restored data
        #[arg(short, long, default_value = DEFAULT_RESTORE_PATH)]
        output: PathBuf,

        /// Input field delimiter (a single character, or "tab")
        #[arg(short, long, default_value = ",")]
        delimiter: Delimiter,
    },
}

/// A single-byte field delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiter(pub u8);

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" | "\\t" | "\t" => Ok(Delimiter(b'\t')),
            _ => match s.as_bytes() {
                [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => {
                    Ok(Delimiter(*b))
                }
                _ => Err(format!(
                    "Invalid delimiter: {:?}. Use a single ASCII character or \"tab\".",
                    s
                )),
            },
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            b'\t' => write!(f, "tab"),
            b => write!(f, "{}", b as char),
        }
    }
}
