use std::fmt::Write as _;

use crate::error::ReportError;

pub(super) fn write_line(output: &mut String, line: &str) -> Result<(), ReportError> {
    writeln!(output, "{}", line).map_err(fmt_error)
}

pub(super) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

pub(super) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keeps a JSON document from terminating the `<script>` block it is
/// embedded in.
pub(super) fn escape_json_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub(super) const fn fmt_error(err: std::fmt::Error) -> ReportError {
    ReportError::Format { source: err }
}
