//! csv-anon CLI - pseudonymise a CSV column.

mod cli;
mod commands;
mod logging;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use logging::{LogConfig, init_logging};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_ansi(std::io::stderr().is_terminal());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to initialise logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Some(Commands::Restore {
            file,
            map,
            field,
            output,
            delimiter,
        }) => commands::restore::run(file, map, field, output, delimiter),

        None => {
            let args = cli.anonymise;
            // An empty value counts as not given.
            let file = args.file.clone().filter(|f| !f.as_os_str().is_empty());
            let Some(file) = file else {
                eprintln!("You must supply a filename");
                eprintln!();
                // Best effort; we exit with failure either way.
                let _ = Cli::command().print_help();
                std::process::exit(1);
            };

            match args.field.as_deref().filter(|f| !f.is_empty()) {
                None => commands::fields::run(&file, args.delimiter),
                Some(field) => commands::anonymise::run(&file, field, &args),
            }
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
