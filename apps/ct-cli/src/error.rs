//! Error type for the command-line front end.

use std::path::PathBuf;

use ct_analytic::AnalyticError;
use ct_project::ProjectError;
use ct_sim::SimError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Project(#[from] ProjectError),

    #[error("Analysis failed: {0}")]
    Analytic(#[from] AnalyticError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV on line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;
