use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ReportError;

use super::record::ResultRecord;

/// File name of the canonical results file inside `<report_dir>/json`.
pub const SIDECAR_FILE: &str = "test_results.json";

/// Replaces the results file with the complete record sequence.
///
/// The array is written to a sibling temp file and renamed over the target,
/// so readers only ever see a complete previous or complete new array.
///
/// # Errors
///
/// Returns an error when serialization, the temp write, or the rename fails.
pub fn write_records(path: &Path, records: &[ResultRecord]) -> Result<(), ReportError> {
    let json = serde_json::to_vec_pretty(records)
        .map_err(|err| ReportError::Serialize { source: err })?;
    write_atomic(path, &json)
}

/// Reads the results file, treating a missing or malformed file as empty.
#[must_use]
pub fn read_records(path: &Path) -> Vec<ResultRecord> {
    match try_read_records(path) {
        Ok(Some(records)) => records,
        Ok(None) => {
            debug!("No results file at '{}'", path.display());
            Vec::new()
        }
        Err(err) => {
            warn!("Ignoring unreadable results file: {}", err);
            Vec::new()
        }
    }
}

/// Reads the results file; `Ok(None)` when it does not exist.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn try_read_records(path: &Path) -> Result<Option<Vec<ResultRecord>>, ReportError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ReportError::ReadSidecar {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };
    serde_json::from_slice(&content)
        .map(Some)
        .map_err(|err| ReportError::ParseSidecar {
            path: path.to_path_buf(),
            source: err,
        })
}

/// Writes `content` to `path` through a temp file and rename, creating the
/// parent directory when needed.
///
/// # Errors
///
/// Returns an error when the directory, temp file, or rename fails.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, content).map_err(|err| ReportError::WriteFile {
        path: tmp_path.clone(),
        source: err,
    })?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        drop(fs::remove_file(&tmp_path));
        return Err(ReportError::ReplaceFile {
            path: path.to_path_buf(),
            source: err,
        });
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
