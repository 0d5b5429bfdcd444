use std::path::{Path, PathBuf};

use chrono::Local;

use super::sidecar::SIDECAR_FILE;

/// Default output root for a run.
pub const DEFAULT_REPORT_DIR: &str = "reports";
/// Format of the tag embedded in report file names.
pub const TIMESTAMP_TAG_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File locations under a report root.
///
/// ```text
/// <root>/json/test_results.json
/// <root>/xlsx/test_report_<env>_<tag>.xlsx
/// <root>/html/test_report_<env>_<tag>.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    root: PathBuf,
}

impl ReportLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn sidecar_path(&self) -> PathBuf {
        self.root.join("json").join(SIDECAR_FILE)
    }

    #[must_use]
    pub fn xlsx_path(&self, environment: &str, tag: &str) -> PathBuf {
        self.root.join("xlsx").join(report_file_name(environment, tag, "xlsx"))
    }

    #[must_use]
    pub fn html_path(&self, environment: &str, tag: &str) -> PathBuf {
        self.root.join("html").join(report_file_name(environment, tag, "html"))
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_DIR)
    }
}

/// Current local time as a report file tag, e.g. `20240101_000000`.
#[must_use]
pub fn timestamp_tag() -> String {
    Local::now().format(TIMESTAMP_TAG_FORMAT).to_string()
}

fn report_file_name(environment: &str, tag: &str, extension: &str) -> String {
    format!(
        "test_report_{}_{}.{}",
        file_component(environment),
        file_component(tag),
        extension
    )
}

/// Replaces characters that would escape or break a single path component.
fn file_component(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace("..", "_")
}
