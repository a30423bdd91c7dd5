use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CopyEditError>;

#[derive(Error, Debug)]
pub enum CopyEditError {
    #[error("Not a valid project at {path:?}: {reason}")]
    ProjectValidation { path: PathBuf, reason: String },
    #[error("No project selected")]
    NoProjectSelected,
    #[error("Translation file not found: {file}")]
    FileNotFound { file: String },
    #[error("Invalid JSON in {file}: {source}")]
    FileParse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Top-level value of {file} is not an object")]
    NotAnObject { file: String },
    #[error("Reading {file}: {source}")]
    FileRead {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Writing {file}: {source}")]
    FileWrite {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to save {} file(s): {}", .failed.len(), .failed.join(", "))]
    SaveIncomplete {
        written: Vec<String>,
        failed: Vec<String>,
    },
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
