use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult, SuiteError};

use super::types::SuiteFile;

enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> AppResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        Some(ext) => Err(AppError::suite(SuiteError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::suite(SuiteError::MissingExtension)),
    }
}

/// Loads and validates the suite at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when a case
/// has an empty name or endpoint.
pub fn load_suite(path: &Path) -> AppResult<SuiteFile> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::suite(SuiteError::ReadSuite {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let suite: SuiteFile = match format {
        Format::Toml => toml::from_str(&content).map_err(|err| {
            AppError::suite(SuiteError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Format::Json => serde_json::from_str(&content).map_err(|err| {
            AppError::suite(SuiteError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
    };
    validate(&suite)?;
    debug!("Loaded {} case(s) from '{}'", suite.cases.len(), path.display());
    Ok(suite)
}

/// Writes `suite` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error when the suite cannot be serialized in the format the
/// extension selects, or the file cannot be written.
pub fn save_suite(path: &Path, suite: &SuiteFile) -> AppResult<()> {
    let serialize_error = |message: String| {
        AppError::suite(SuiteError::Serialize {
            path: path.to_path_buf(),
            message,
        })
    };
    let content = match format_of(path)? {
        Format::Toml => toml::to_string_pretty(suite).map_err(|err| serialize_error(err.to_string()))?,
        Format::Json => {
            serde_json::to_string_pretty(suite).map_err(|err| serialize_error(err.to_string()))?
        }
    };
    let write_error = |err: std::io::Error| {
        AppError::suite(SuiteError::WriteSuite {
            path: path.to_path_buf(),
            source: err,
        })
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, content).map_err(write_error)
}

fn validate(suite: &SuiteFile) -> AppResult<()> {
    for (index, case) in suite.cases.iter().enumerate() {
        if case.name.trim().is_empty() {
            return Err(AppError::suite(SuiteError::EmptyCaseName { index }));
        }
        if case.endpoint.trim().is_empty() {
            return Err(AppError::suite(SuiteError::EmptyEndpoint {
                name: case.name.clone(),
            }));
        }
    }
    Ok(())
}
