#![deny(missing_docs)]

//! # Collection2OpenAPI CLI
//!
//! Command Line Interface for converting API collections into OpenAPI
//! documents.
//!
//! Supported Commands:
//! - `convert`: Collection JSON -> OpenAPI JSON/YAML.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod config;
mod convert;
mod error;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Collection to OpenAPI converter")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Converts a collection file into an OpenAPI document.
    Convert(convert::ConvertArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match &cli.command {
        Commands::Convert(args) => {
            convert::execute(args)?;
        }
    }

    Ok(())
}
