use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::ReportError;

use super::record::ResultRecord;

pub const SHEET_NAME: &str = "Test Results";
/// Header row, in column order.
pub const COLUMNS: [&str; 9] = [
    "test_name",
    "status",
    "response_code",
    "url",
    "method",
    "headers",
    "response_body",
    "Time Duration (s)",
    "timestamp",
];
/// Characters added to the widest cell of a column.
pub const COLUMN_PADDING: usize = 5;
/// Upper bound on a column width, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl Cell {
    /// Width of the cell as displayed, in characters.
    #[must_use]
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Text(text) => text.chars().count(),
            Cell::Number(value) => value.to_string().chars().count(),
            Cell::Blank => 0,
        }
    }
}

/// Worksheet contents before they are handed to the xlsx writer.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetModel {
    pub rows: Vec<Vec<Cell>>,
    pub widths: Vec<usize>,
}

impl SheetModel {
    #[must_use]
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let rows: Vec<Vec<Cell>> = records.iter().map(record_row).collect();
        let widths = COLUMNS
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let longest = rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::display_len)
                    .max()
                    .unwrap_or(0);
                column_width(longest, header.chars().count())
            })
            .collect();
        Self { rows, widths }
    }
}

/// `min(max(longest, header) + padding, max width)`.
#[must_use]
pub fn column_width(longest_cell: usize, header_len: usize) -> usize {
    longest_cell
        .max(header_len)
        .saturating_add(COLUMN_PADDING)
        .min(MAX_COLUMN_WIDTH)
}

fn record_row(record: &ResultRecord) -> Vec<Cell> {
    let headers = serde_json::to_string(&record.headers).unwrap_or_default();
    vec![
        Cell::Text(record.test_name.clone()),
        Cell::Text(record.status.as_str().to_owned()),
        record
            .response_code
            .map_or(Cell::Blank, |code| Cell::Number(f64::from(code))),
        Cell::Text(record.url.clone()),
        Cell::Text(record.method.clone()),
        Cell::Text(headers),
        Cell::Text(record.response_body.clone()),
        Cell::Number(record.time_duration),
        Cell::Text(record.timestamp.clone()),
    ]
}

/// Writes `model` as a single-sheet workbook at `path`.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the workbook
/// cannot be assembled or saved.
pub fn write_workbook(path: &Path, model: &SheetModel) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }
    build_workbook(model)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|err| ReportError::Workbook {
            path: path.to_path_buf(),
            source: err,
        })
}

fn build_workbook(model: &SheetModel) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let wrap = Format::new().set_text_wrap();
    let header = Format::new().set_bold().set_text_wrap();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(COLUMNS.iter()) {
        worksheet.write_string_with_format(0, col, *title, &header)?;
    }

    for (row_idx, row) in (1u32..).zip(model.rows.iter()) {
        for (col, cell) in (0u16..).zip(row.iter()) {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string_with_format(row_idx, col, text, &wrap)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number_with_format(row_idx, col, *value, &wrap)?;
                }
                Cell::Blank => {
                    worksheet.write_blank(row_idx, col, &wrap)?;
                }
            }
        }
    }

    for (col, width) in (0u16..).zip(model.widths.iter()) {
        let width = u16::try_from(*width).unwrap_or(u16::MAX);
        worksheet.set_column_width(col, f64::from(width))?;
    }

    Ok(workbook)
}
