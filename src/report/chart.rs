use plotters::element::Pie;
use plotters::prelude::*;
use serde::Serialize;

use crate::error::ReportError;

use super::record::{ResultRecord, TestStatus};

/// Label of the single slice drawn when there are no results.
pub const NO_RESULTS_LABEL: &str = "No Results";

const CHART_SIZE: (u32, u32) = (420, 320);
const CHART_CENTER: (i32, i32) = (210, 160);
const CHART_RADIUS: f64 = 120.0;
const CHART_HOLE: f64 = 60.0;

const PASS_COLOR: RGBColor = RGBColor(40, 167, 69);
const FAIL_COLOR: RGBColor = RGBColor(220, 53, 69);
const SKIPPED_COLOR: RGBColor = RGBColor(255, 193, 7);
const EMPTY_COLOR: RGBColor = RGBColor(108, 117, 125);
const OTHER_COLORS: [RGBColor; 4] = [
    RGBColor(23, 162, 184),
    RGBColor(111, 66, 193),
    RGBColor(253, 126, 20),
    RGBColor(52, 58, 64),
];

/// One slice of the status proportions chart.
#[derive(Debug, Clone)]
pub struct ChartSlice {
    pub label: String,
    pub count: u64,
    pub color: RGBColor,
}

/// Payload handed to the client-side chart.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub colors: Vec<String>,
    /// False for the placeholder slice; clicking it must not filter.
    pub filterable: bool,
}

/// Groups records by status value in first-seen order.
///
/// Every distinct status gets its own slice, known or not. An empty row set
/// yields a single [`NO_RESULTS_LABEL`] slice.
#[must_use]
pub fn status_slices(records: &[ResultRecord]) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = Vec::new();
    let mut others = 0usize;
    for record in records {
        let label = record.status.as_str();
        if let Some(slice) = slices.iter_mut().find(|slice| slice.label == label) {
            slice.count = slice.count.saturating_add(1);
            continue;
        }
        let color = match record.status {
            TestStatus::Pass => PASS_COLOR,
            TestStatus::Fail => FAIL_COLOR,
            TestStatus::Skipped => SKIPPED_COLOR,
            TestStatus::Other(_) => {
                let color = OTHER_COLORS
                    .get(others % OTHER_COLORS.len())
                    .copied()
                    .unwrap_or(EMPTY_COLOR);
                others = others.saturating_add(1);
                color
            }
        };
        slices.push(ChartSlice {
            label: label.to_owned(),
            count: 1,
            color,
        });
    }

    if slices.is_empty() {
        slices.push(ChartSlice {
            label: NO_RESULTS_LABEL.to_owned(),
            count: 1,
            color: EMPTY_COLOR,
        });
    }
    slices
}

#[must_use]
pub fn chart_data(slices: &[ChartSlice], has_records: bool) -> ChartData {
    ChartData {
        labels: slices.iter().map(|slice| slice.label.clone()).collect(),
        counts: slices.iter().map(|slice| slice.count).collect(),
        colors: slices.iter().map(|slice| hex_color(slice.color)).collect(),
        filterable: has_records,
    }
}

#[must_use]
pub fn hex_color(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Draws the slices as a static SVG donut.
///
/// # Errors
///
/// Returns an error when plotters cannot lay out or draw the chart (for
/// example when no font is available for the labels).
pub fn render_svg_donut(slices: &[ChartSlice]) -> Result<String, ReportError> {
    let sizes: Vec<f64> = slices.iter().map(|slice| slice.count as f64).collect();
    let colors: Vec<RGBColor> = slices.iter().map(|slice| slice.color).collect();
    let labels: Vec<String> = slices
        .iter()
        .map(|slice| format!("{} ({})", slice.label, slice.count))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut pie = Pie::new(&CHART_CENTER, &CHART_RADIUS, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.donut_hole(CHART_HOLE);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        root.draw(&pie).map_err(chart_error)?;
        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

fn chart_error<E>(err: E) -> ReportError
where
    E: std::fmt::Display,
{
    ReportError::Chart {
        message: err.to_string(),
    }
}
