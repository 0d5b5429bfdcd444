use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult, SuiteError};
use crate::suite::{SuiteFile, TestCase, load_suite, save_suite};

use super::parse::parse_curl;

/// Reads the curl command saved at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn read_curl_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|err| {
        AppError::suite(SuiteError::ReadCurl {
            path: path.to_path_buf(),
            source: err,
        })
    })
}

/// Adds `case` to the suite at `suite_path`, creating the file if needed.
///
/// Returns `false` and leaves the file untouched when a case with the same
/// name already exists.
///
/// # Errors
///
/// Returns an error when the suite cannot be loaded or written.
pub fn append_case(suite_path: &Path, case: TestCase) -> AppResult<bool> {
    let mut suite = if suite_path.exists() {
        load_suite(suite_path)?
    } else {
        SuiteFile::default()
    };
    if suite.contains(&case.name) {
        info!(
            "Case '{}' already exists in '{}'",
            case.name,
            suite_path.display()
        );
        return Ok(false);
    }
    info!("Adding case '{}' to '{}'", case.name, suite_path.display());
    suite.cases.push(case);
    save_suite(suite_path, &suite)?;
    Ok(true)
}

/// Parses the curl file and appends the resulting case to the suite.
///
/// # Errors
///
/// Returns an error when the curl file cannot be read or parsed, or the
/// suite cannot be updated.
pub fn import_curl_file(curl_file: &Path, suite_path: &Path) -> AppResult<(TestCase, bool)> {
    let command = read_curl_file(curl_file)?;
    let request = parse_curl(command.trim())?;
    let case = request.to_case();
    let added = append_case(suite_path, case.clone())?;
    Ok((case, added))
}
