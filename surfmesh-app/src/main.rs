//! Surfmesh command line tool
//!
//! Inspect and re-save ASCII PLY surface meshes.
//!
//! Commands:
//! - `info`: counts, attribute names, bounds and per-attribute ranges
//! - `resave`: load a mesh and write it back with chosen precision

mod app;
mod summary;

use app::{Command, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Surfmesh - ASCII PLY surface mesh tool
#[derive(Parser, Debug)]
#[command(name = "surfmesh")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a summary of a PLY mesh
    Info {
        /// PLY file to inspect
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Fail on faces that are not triangles
        #[arg(long)]
        strict: bool,
    },
    /// Load a PLY mesh and write it to a new file
    Resave {
        input: PathBuf,
        output: PathBuf,

        /// Decimal places for float values
        #[arg(short, long, default_value_t = 2)]
        precision: usize,

        /// Generator comment written into the header
        #[arg(long)]
        comment: Option<String>,

        /// Fail on faces that are not triangles
        #[arg(long)]
        strict: bool,
    },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Info { file, json, strict } => Command::Info { file, json, strict },
            Commands::Resave {
                input,
                output,
                precision,
                comment,
                strict,
            } => Command::Resave {
                input,
                output,
                precision,
                comment,
                strict,
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    app::init_logging(&LoggingConfig {
        level: args.log_level,
    });

    if let Err(e) = app::run(args.command.into()) {
        eprintln!("surfmesh error: {}", e);
        std::process::exit(1);
    }
}
