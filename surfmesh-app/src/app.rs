//! Command execution and logging setup.

use crate::summary::MeshSummary;
use std::path::PathBuf;
use surfmesh_data::{FacePolicy, LoadOptions, Mesh, MeshError, SaveOptions};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the command line tool.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A parsed command line request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Info {
        file: PathBuf,
        json: bool,
        strict: bool,
    },
    Resave {
        input: PathBuf,
        output: PathBuf,
        precision: usize,
        comment: Option<String>,
        strict: bool,
    },
}

pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn face_policy(strict: bool) -> FacePolicy {
    if strict {
        FacePolicy::Strict
    } else {
        FacePolicy::Lenient
    }
}

/// Run `command`, printing its report to stdout.
pub fn run(command: Command) -> Result<(), AppError> {
    let report = execute(&command)?;
    if !report.is_empty() {
        println!("{report}");
    }
    Ok(())
}

/// Run `command` and return the text it would print.
pub fn execute(command: &Command) -> Result<String, AppError> {
    match command {
        Command::Info { file, json, strict } => {
            let options = LoadOptions::default().with_face_policy(face_policy(*strict));
            let mut mesh = Mesh::empty();
            mesh.load_with(file, &options)?;

            let summary = MeshSummary::from_mesh(&mesh)?;
            if *json {
                Ok(serde_json::to_string_pretty(&summary)?)
            } else {
                Ok(summary.to_string())
            }
        }
        Command::Resave {
            input,
            output,
            precision,
            comment,
            strict,
        } => {
            let policy = face_policy(*strict);
            let mut mesh = Mesh::empty();
            mesh.load_with(input, &LoadOptions::default().with_face_policy(policy))?;

            let mut options = SaveOptions::default()
                .with_precision(*precision)
                .with_face_policy(policy);
            if let Some(comment) = comment {
                options = options.with_comment(comment.clone());
            }
            mesh.save_with(output, &options)?;

            info!("Resaved {} -> {}", input.display(), output.display());
            Ok(String::new())
        }
    }
}
