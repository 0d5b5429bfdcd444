//! Self-contained HTML report.
//!
//! The document carries summary cards, a status doughnut chart, and a
//! per-test table. Styling and interactivity come from a few CDN assets; a
//! static SVG rendering of the chart is embedded for offline viewing.
use std::fmt::Write as _;

use tracing::warn;

use crate::error::ReportError;

use super::chart::{chart_data, render_svg_donut, status_slices};
use super::format::{escape_html, escape_json_for_script, fmt_error, format_x100, write_line};
use super::record::ResultRecord;
use super::summary::{LatencyBand, StatusSummary};

pub const BOOTSTRAP_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
pub const DATATABLES_CSS_URL: &str =
    "https://cdn.datatables.net/1.13.8/css/jquery.dataTables.min.css";
pub const JQUERY_URL: &str = "https://code.jquery.com/jquery-3.7.1.min.js";
pub const DATATABLES_JS_URL: &str =
    "https://cdn.datatables.net/1.13.8/js/jquery.dataTables.min.js";
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Zero-based index of the status column in the detail table.
const STATUS_COLUMN: usize = 2;

const INLINE_CSS: &str = r#"
    body { background: #f8f9fa; }
    .summary-card { min-width: 10rem; }
    .chart-box { max-width: 420px; margin: 0 auto; }
    .status-pass .status-badge { background: #28a745; }
    .status-fail .status-badge { background: #dc3545; }
    .status-skipped .status-badge { background: #ffc107; color: #212529; }
    .status-badge { background: #6c757d; color: #fff; }
    .latency-fast { color: #28a745; font-weight: 600; }
    .latency-moderate { color: #fd7e14; font-weight: 600; }
    .latency-slow { color: #dc3545; font-weight: 600; }
    td.url-cell { word-break: break-all; max-width: 24rem; }
    details pre { max-height: 20rem; overflow: auto; white-space: pre-wrap; word-break: break-all; }
    details summary { cursor: pointer; }
"#;

const REPORT_SCRIPT: &str = r#"
(function () {
  var data = JSON.parse(document.getElementById('chart-data').textContent);
  var table = $('#results').DataTable({ pageLength: 25, order: [] });
  var active = document.getElementById('active-filter');

  function applyFilter(status) {
    if (status === null) {
      table.column(__STATUS_COLUMN__).search('').draw();
      active.textContent = 'All';
      return;
    }
    var escaped = status.replace(/[.*+?^${}()|[\]\\]/g, '\\$&');
    table.column(__STATUS_COLUMN__).search('^' + escaped + '$', true, false).draw();
    active.textContent = status;
  }

  new Chart(document.getElementById('status-chart'), {
    type: 'doughnut',
    data: {
      labels: data.labels,
      datasets: [{ data: data.counts, backgroundColor: data.colors }]
    },
    options: {
      plugins: { title: { display: true, text: 'Test Results by Status' } },
      onClick: function (event, elements) {
        if (!data.filterable || elements.length === 0) {
          return;
        }
        applyFilter(data.labels[elements[0].index]);
      }
    }
  });

  document.getElementById('reset-filter').addEventListener('click', function () {
    applyFilter(null);
  });
})();
"#;

/// Inputs of a single HTML rendering.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub environment: &'a str,
    pub generated_at: &'a str,
    pub records: &'a [ResultRecord],
}

/// Renders the full HTML document.
///
/// # Errors
///
/// Returns an error when the chart payload cannot be serialized or the
/// document cannot be formatted.
pub fn render_html(ctx: &ReportContext<'_>) -> Result<String, ReportError> {
    let summary = StatusSummary::from_records(ctx.records);
    let slices = status_slices(ctx.records);
    let data = chart_data(&slices, !ctx.records.is_empty());
    let data_json =
        serde_json::to_string(&data).map_err(|err| ReportError::Serialize { source: err })?;
    let fallback = match render_svg_donut(&slices) {
        Ok(svg) => Some(svg),
        Err(err) => {
            warn!("Skipping static chart fallback: {}", err);
            None
        }
    };

    let mut html = String::with_capacity(
        ctx.records
            .len()
            .saturating_mul(2048)
            .saturating_add(16_384),
    );
    write_head(&mut html, ctx.environment)?;
    write_line(&mut html, "<body>")?;
    write_line(&mut html, "<div class=\"container-fluid py-4\">")?;
    write_title(&mut html, ctx)?;
    write_summary(&mut html, &summary)?;
    write_chart(&mut html, fallback.as_deref())?;
    write_table(&mut html, ctx.records)?;
    write_line(&mut html, "</div>")?;
    write_scripts(&mut html, &data_json)?;
    write_line(&mut html, "</body>")?;
    write_line(&mut html, "</html>")?;
    Ok(html)
}

fn write_head(html: &mut String, environment: &str) -> Result<(), ReportError> {
    write_line(html, "<!DOCTYPE html>")?;
    write_line(html, "<html lang=\"en\">")?;
    write_line(html, "<head>")?;
    write_line(html, "  <meta charset=\"UTF-8\">")?;
    write_line(
        html,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">",
    )?;
    writeln!(
        html,
        "  <title>API Test Report - {}</title>",
        escape_html(environment)
    )
    .map_err(fmt_error)?;
    writeln!(
        html,
        "  <meta name=\"generator\" content=\"apiregress {}\">",
        env!("CARGO_PKG_VERSION")
    )
    .map_err(fmt_error)?;
    writeln!(html, "  <link rel=\"stylesheet\" href=\"{}\">", BOOTSTRAP_CSS_URL)
        .map_err(fmt_error)?;
    writeln!(html, "  <link rel=\"stylesheet\" href=\"{}\">", DATATABLES_CSS_URL)
        .map_err(fmt_error)?;
    write_line(html, "  <style>")?;
    html.push_str(INLINE_CSS);
    write_line(html, "  </style>")?;
    write_line(html, "</head>")
}

fn write_title(html: &mut String, ctx: &ReportContext<'_>) -> Result<(), ReportError> {
    write_line(html, "<h1 class=\"mb-1\">API Test Report</h1>")?;
    writeln!(
        html,
        "<p class=\"text-muted\">Environment: <strong>{}</strong> &middot; Generated: {} &middot; Tests: {}</p>",
        escape_html(ctx.environment),
        escape_html(ctx.generated_at),
        ctx.records.len()
    )
    .map_err(fmt_error)
}

fn write_summary(html: &mut String, summary: &StatusSummary) -> Result<(), ReportError> {
    write_line(html, "<div class=\"d-flex flex-wrap gap-3 my-4\" id=\"summary\">")?;
    write_card(html, "Total", "secondary", summary.total, None)?;
    write_card(
        html,
        "PASS",
        "success",
        summary.passed,
        Some(summary.passed_pct_x100()),
    )?;
    write_card(
        html,
        "FAIL",
        "danger",
        summary.failed,
        Some(summary.failed_pct_x100()),
    )?;
    write_card(
        html,
        "SKIPPED",
        "warning",
        summary.skipped,
        Some(summary.skipped_pct_x100()),
    )?;
    if summary.other > 0 {
        write_card(
            html,
            "Other",
            "info",
            summary.other,
            Some(summary.other_pct_x100()),
        )?;
    }
    write_line(html, "</div>")
}

fn write_card(
    html: &mut String,
    title: &str,
    tone: &str,
    count: u64,
    pct_x100: Option<u64>,
) -> Result<(), ReportError> {
    writeln!(
        html,
        "  <div class=\"card summary-card border-{}\"><div class=\"card-body\">",
        tone
    )
    .map_err(fmt_error)?;
    writeln!(html, "    <h6 class=\"card-title text-{}\">{}</h6>", tone, title)
        .map_err(fmt_error)?;
    writeln!(html, "    <p class=\"display-6 mb-0\">{}</p>", count).map_err(fmt_error)?;
    if let Some(pct) = pct_x100 {
        writeln!(
            html,
            "    <p class=\"text-muted mb-0 pct\">{}%</p>",
            format_x100(pct)
        )
        .map_err(fmt_error)?;
    }
    write_line(html, "  </div></div>")
}

fn write_chart(html: &mut String, fallback_svg: Option<&str>) -> Result<(), ReportError> {
    write_line(html, "<section class=\"chart-box mb-4\">")?;
    write_line(html, "  <canvas id=\"status-chart\"></canvas>")?;
    if let Some(svg) = fallback_svg {
        write_line(html, "  <noscript>")?;
        html.push_str(svg);
        write_line(html, "")?;
        write_line(html, "  </noscript>")?;
    }
    write_line(html, "</section>")
}

fn write_table(html: &mut String, records: &[ResultRecord]) -> Result<(), ReportError> {
    write_line(html, "<h2 class=\"h4\">Test Details</h2>")?;
    write_line(
        html,
        "<p>Filter: <strong id=\"active-filter\">All</strong> <button type=\"button\" class=\"btn btn-sm btn-outline-secondary\" id=\"reset-filter\">Show all</button></p>",
    )?;
    write_line(
        html,
        "<table id=\"results\" class=\"table table-striped table-bordered align-middle\">",
    )?;
    write_line(
        html,
        "<thead><tr><th>#</th><th>Test Name</th><th>Status</th><th>Code</th><th>Method</th><th>URL</th><th>Duration (s)</th><th>Timestamp</th><th>Headers</th><th>Response Body</th></tr></thead>",
    )?;
    write_line(html, "<tbody>")?;
    for (index, record) in (1usize..).zip(records.iter()) {
        write_row(html, index, record)?;
    }
    write_line(html, "</tbody>")?;
    write_line(html, "</table>")
}

fn write_row(html: &mut String, index: usize, record: &ResultRecord) -> Result<(), ReportError> {
    let css = record.status.css_token();
    let band = LatencyBand::classify(record.time_duration);
    let code = record
        .response_code
        .map_or_else(|| "-".to_owned(), |code| code.to_string());
    let headers = serde_json::to_string_pretty(&record.headers).unwrap_or_default();

    writeln!(
        html,
        "<tr class=\"status-{}\" data-status=\"{}\">",
        css,
        escape_html(record.status.as_str())
    )
    .map_err(fmt_error)?;
    writeln!(html, "  <td>{}</td>", index).map_err(fmt_error)?;
    writeln!(html, "  <td>{}</td>", escape_html(&record.test_name)).map_err(fmt_error)?;
    writeln!(
        html,
        "  <td><span class=\"badge status-badge\">{}</span></td>",
        escape_html(record.status.as_str())
    )
    .map_err(fmt_error)?;
    writeln!(html, "  <td>{}</td>", code).map_err(fmt_error)?;
    writeln!(html, "  <td>{}</td>", escape_html(&record.method)).map_err(fmt_error)?;
    writeln!(
        html,
        "  <td class=\"url-cell\">{}</td>",
        escape_html(&record.url)
    )
    .map_err(fmt_error)?;
    writeln!(
        html,
        "  <td class=\"latency latency-{}\" data-order=\"{}\">{:.3}</td>",
        band.as_str(),
        record.time_duration,
        record.time_duration
    )
    .map_err(fmt_error)?;
    writeln!(html, "  <td>{}</td>", escape_html(&record.timestamp)).map_err(fmt_error)?;
    write_disclosure(
        html,
        &format!("{} headers", record.headers.len()),
        &headers,
        record.headers.is_empty(),
    )?;
    write_disclosure(
        html,
        &format!("{} chars", record.response_body.chars().count()),
        &record.response_body,
        record.response_body.is_empty(),
    )?;
    write_line(html, "</tr>")
}

fn write_disclosure(
    html: &mut String,
    summary: &str,
    content: &str,
    empty: bool,
) -> Result<(), ReportError> {
    if empty {
        return write_line(html, "  <td><span class=\"text-muted\">-</span></td>");
    }
    writeln!(
        html,
        "  <td><details><summary>{}</summary><pre>{}</pre></details></td>",
        escape_html(summary),
        escape_html(content)
    )
    .map_err(fmt_error)
}

fn write_scripts(html: &mut String, data_json: &str) -> Result<(), ReportError> {
    writeln!(
        html,
        "<script type=\"application/json\" id=\"chart-data\">{}</script>",
        escape_json_for_script(data_json)
    )
    .map_err(fmt_error)?;
    writeln!(html, "<script src=\"{}\"></script>", JQUERY_URL).map_err(fmt_error)?;
    writeln!(html, "<script src=\"{}\"></script>", DATATABLES_JS_URL).map_err(fmt_error)?;
    writeln!(html, "<script src=\"{}\"></script>", CHART_JS_URL).map_err(fmt_error)?;
    write_line(html, "<script>")?;
    html.push_str(&REPORT_SCRIPT.replace("__STATUS_COLUMN__", &STATUS_COLUMN.to_string()));
    write_line(html, "</script>")
}
