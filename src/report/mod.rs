//! Result ledger and report rendering.
//!
//! [`Reporter`] is the single entry point: test code calls
//! [`Reporter::record`] once per outcome, and the CLI calls the render
//! methods at the end of a run. Every render re-reads the results file, so
//! reports can be produced by a later process than the one that ran tests.
mod chart;
mod format;
mod html;
mod layout;
mod ledger;
mod record;
mod sidecar;
mod summary;
mod tabular;


use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use serde::Serialize;
use tracing::{debug, error, info};

pub use chart::{ChartSlice, NO_RESULTS_LABEL, status_slices};
pub use html::{ReportContext, render_html};
pub use layout::{DEFAULT_REPORT_DIR, ReportLayout, timestamp_tag};
pub use ledger::Ledger;
pub use record::{
    RESPONSE_BODY_LIMIT, RequestInfo, ResultRecord, TIMESTAMP_FORMAT, TRUNCATION_MARKER,
    TestStatus, serialize_body, truncate_body,
};
pub use sidecar::{SIDECAR_FILE, read_records, try_read_records, write_records};
pub use summary::{FAST_BELOW_SECS, LatencyBand, SLOW_FROM_SECS, StatusSummary, percent_x100};
pub use tabular::{COLUMNS, Cell, SHEET_NAME, SheetModel, column_width};

/// Paths produced by [`Reporter::render_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReports {
    pub xlsx: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Owns the run's ledger and renders reports from the results file.
///
/// One instance per run. Recording is serialized behind a mutex, so a shared
/// reference may be handed to several threads without interleaving rewrites.
#[derive(Debug)]
pub struct Reporter {
    layout: ReportLayout,
    ledger: Mutex<Ledger>,
}

impl Reporter {
    #[must_use]
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        let layout = ReportLayout::new(report_dir);
        let ledger = Ledger::new(layout.sidecar_path());
        Self {
            layout,
            ledger: Mutex::new(ledger),
        }
    }

    #[must_use]
    pub const fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    #[must_use]
    pub fn report_dir(&self) -> &Path {
        self.layout.root()
    }

    #[must_use]
    pub fn sidecar_path(&self) -> PathBuf {
        self.layout.sidecar_path()
    }

    /// Starts a fresh run: clears the in-memory ledger and replaces any
    /// results file left by a previous run with an empty array.
    ///
    /// Construction alone never touches the disk, so a reporter built only to
    /// re-render an existing results file keeps it intact.
    pub fn begin_run(&self) {
        let mut ledger = self.lock_ledger();
        *ledger = Ledger::new(self.layout.sidecar_path());
        if let Err(err) = write_records(ledger.sidecar_path(), ledger.records()) {
            error!("Failed to reset results file: {}", err);
        }
    }

    /// Records one outcome and rewrites the results file.
    ///
    /// Persistence failures are logged and swallowed; the record stays in
    /// memory and is written with the next successful rewrite.
    pub fn record<B>(
        &self,
        test_name: &str,
        status: TestStatus,
        response_code: Option<u16>,
        request: RequestInfo,
        response_body: &B,
    ) where
        B: Serialize + ?Sized,
    {
        let record = ResultRecord::capture(test_name, status, response_code, request, response_body);
        debug!(
            "Recording {} = {} ({:?})",
            record.test_name, record.status, record.response_code
        );
        let mut ledger = self.lock_ledger();
        if let Err(err) = ledger.append(record) {
            error!(
                "Failed to persist result #{} to '{}': {}",
                ledger.len(),
                ledger.sidecar_path().display(),
                err
            );
        }
    }

    /// Snapshot of the in-memory ledger.
    #[must_use]
    pub fn records(&self) -> Vec<ResultRecord> {
        self.lock_ledger().records().to_vec()
    }

    /// Writes `<report_dir>/xlsx/test_report_<env>_<tag>.xlsx`.
    ///
    /// Returns `None` without creating anything when the results file is
    /// missing or empty, and `None` after logging when writing fails.
    #[must_use]
    pub fn render_tabular(&self, environment: &str, tag: &str) -> Option<PathBuf> {
        let records = read_records(&self.layout.sidecar_path());
        if records.is_empty() {
            info!("No results recorded; skipping XLSX report.");
            return None;
        }

        let path = self.layout.xlsx_path(environment, tag);
        let model = SheetModel::from_records(&records);
        match tabular::write_workbook(&path, &model) {
            Ok(()) => {
                info!("XLSX report written to '{}'", path.display());
                Some(path)
            }
            Err(err) => {
                error!("Failed to write XLSX report: {}", err);
                None
            }
        }
    }

    /// Writes `<report_dir>/html/test_report_<env>_<tag>.html`.
    ///
    /// An empty or missing results file still produces a document with a
    /// single "No Results" slice. Returns `None` after logging on failure.
    #[must_use]
    pub fn render_report(&self, environment: &str, tag: &str) -> Option<PathBuf> {
        let records = read_records(&self.layout.sidecar_path());
        let generated_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let ctx = ReportContext {
            environment,
            generated_at: &generated_at,
            records: &records,
        };

        let path = self.layout.html_path(environment, tag);
        let written = render_html(&ctx)
            .and_then(|html| sidecar::write_atomic(&path, html.as_bytes()));
        match written {
            Ok(()) => {
                info!("HTML report written to '{}'", path.display());
                Some(path)
            }
            Err(err) => {
                error!("Failed to write HTML report: {}", err);
                None
            }
        }
    }

    /// Renders both reports with the same tag.
    #[must_use]
    pub fn render_all(&self, environment: &str, tag: &str) -> RenderedReports {
        RenderedReports {
            xlsx: self.render_tabular(environment, tag),
            html: self.render_report(environment, tag),
        }
    }

    fn lock_ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_DIR)
    }
}
