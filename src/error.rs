use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot access visit counter {path}: {source}")]
    VisitFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("visit counter {path} is not valid JSON: {source}")]
    VisitRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
