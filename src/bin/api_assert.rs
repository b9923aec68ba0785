// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line front end for JSON response assertions
//!
//! Reads a JSON document from a file or stdin and runs one extraction or check
//! against it. Exits with status 1 when the check fails.

use anyhow::{Context, Result, bail};
use api_assert::{
    IndexPolicy, NullPolicy, ResponseSnapshot, ResponseValidator, SchemaSource, ValidatorConfig,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "api-assert")]
#[command(about = "Extract values from JSON documents and assert on them")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// JSON file holding the document (reads from stdin if not provided)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat an out-of-range array index as a missing value
    #[arg(long, global = true)]
    lenient_index: bool,

    /// Treat an explicit null as missing in `exists`
    #[arg(long, global = true)]
    null_is_missing: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get {
        /// Path expression, e.g. data.items[0].name
        path: String,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check that the value at a path equals the expected text
    Equals {
        /// Path expression
        path: String,
        /// Expected value, compared as text
        expected: String,
    },
    /// Check that a path is present
    Exists {
        /// Path expression
        path: String,
        /// Failure message
        #[arg(short, long, default_value = "Expected path is not present")]
        message: String,
    },
    /// Validate the document against a JSON Schema file
    Schema {
        /// Schema file
        schema: PathBuf,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ValidatorConfig::from_json_file(path)?,
        None => ValidatorConfig::default(),
    };
    if cli.lenient_index {
        config.index_policy = IndexPolicy::Lenient;
    }
    if cli.null_is_missing {
        config.null_policy = NullPolicy::Missing;
    }
    log::debug!("Using configuration: {config:?}");

    let validator = ResponseValidator::new().with_config(config);
    let body = read_document(cli.file.as_deref())?;

    match cli.command {
        Commands::Get { path, pretty } => {
            let Some(document) = validator.json_from_str(Some(body.as_str()))? else {
                bail!("document is empty");
            };
            let node = validator.query(&document, &path)?;
            let Some(value) = node.to_value() else {
                bail!("no value at path {path}");
            };
            let output = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{output}");
        }
        Commands::Equals { path, expected } => {
            validator.validate_value(Some(body.as_str()), &path, &expected)?;
        }
        Commands::Exists { path, message } => {
            validator.validate_contains(Some(body.as_str()), &path, &message)?;
        }
        Commands::Schema { schema } => {
            let response = ResponseSnapshot::new(200, body);
            validator.validate_schema(Some(&response), &SchemaSource::Path(schema))?;
        }
    }
    Ok(())
}

fn read_document(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Error reading from stdin")?;
            Ok(buffer)
        }
    }
}
