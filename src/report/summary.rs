use super::record::{ResultRecord, TestStatus};

/// Latencies below this many seconds are banded as fast.
pub const FAST_BELOW_SECS: f64 = 0.2;
/// Latencies at or above this many seconds are banded as slow.
pub const SLOW_FROM_SECS: f64 = 0.5;

/// Display band for a request latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyBand {
    Fast,
    Moderate,
    Slow,
}

impl LatencyBand {
    #[must_use]
    pub fn classify(seconds: f64) -> Self {
        if seconds < FAST_BELOW_SECS {
            LatencyBand::Fast
        } else if seconds < SLOW_FROM_SECS {
            LatencyBand::Moderate
        } else {
            LatencyBand::Slow
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LatencyBand::Fast => "fast",
            LatencyBand::Moderate => "moderate",
            LatencyBand::Slow => "slow",
        }
    }
}

/// Status counts over a full row set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub other: u64,
}

impl StatusSummary {
    #[must_use]
    pub fn from_records(records: &[ResultRecord]) -> Self {
        records
            .iter()
            .fold(StatusSummary::default(), |mut summary, record| {
                summary.total = summary.total.saturating_add(1);
                let slot = match record.status {
                    TestStatus::Pass => &mut summary.passed,
                    TestStatus::Fail => &mut summary.failed,
                    TestStatus::Skipped => &mut summary.skipped,
                    TestStatus::Other(_) => &mut summary.other,
                };
                *slot = slot.saturating_add(1);
                summary
            })
    }

    #[must_use]
    pub fn passed_pct_x100(&self) -> u64 {
        percent_x100(self.passed, self.total)
    }

    #[must_use]
    pub fn failed_pct_x100(&self) -> u64 {
        percent_x100(self.failed, self.total)
    }

    #[must_use]
    pub fn skipped_pct_x100(&self) -> u64 {
        percent_x100(self.skipped, self.total)
    }

    #[must_use]
    pub fn other_pct_x100(&self) -> u64 {
        percent_x100(self.other, self.total)
    }
}

/// Share of `count` in `total` in hundredths of a percent, rounded half up.
/// Zero when `total` is zero.
#[must_use]
pub fn percent_x100(count: u64, total: u64) -> u64 {
    let half = total.checked_div(2).unwrap_or(0);
    count
        .saturating_mul(10_000)
        .saturating_add(half)
        .checked_div(total)
        .unwrap_or(0)
}
