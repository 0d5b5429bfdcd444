use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::http::{ApiClient, ApiExchange};
use crate::report::{RequestInfo, Reporter, TestStatus};

use super::types::{SuiteFile, TestCase};

/// Selects which cases of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    pub environment: String,
    /// Substring a case name must contain; non-matching cases are dropped
    /// without being recorded.
    pub keyword: Option<String>,
}

impl RunFilter {
    #[must_use]
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            keyword: None,
        }
    }

    #[must_use]
    pub fn selects(&self, case: &TestCase) -> bool {
        self.keyword
            .as_deref()
            .is_none_or(|keyword| case.name.contains(keyword))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunOutcome {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.skipped)
    }

    /// True when no executed case failed. Skipped cases do not count.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn count(&mut self, status: &TestStatus) {
        match status {
            TestStatus::Pass => self.passed = self.passed.saturating_add(1),
            TestStatus::Skipped => self.skipped = self.skipped.saturating_add(1),
            TestStatus::Fail | TestStatus::Other(_) => self.failed = self.failed.saturating_add(1),
        }
    }
}

/// Status of one executed case and, on failure, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: TestStatus,
    pub reason: Option<String>,
}

impl Verdict {
    const fn pass() -> Self {
        Self {
            status: TestStatus::Pass,
            reason: None,
        }
    }

    const fn fail(reason: String) -> Self {
        Self {
            status: TestStatus::Fail,
            reason: Some(reason),
        }
    }
}

/// Checks an exchange against the case's expectations.
#[must_use]
pub fn evaluate(case: &TestCase, exchange: &ApiExchange) -> Verdict {
    let Some(status) = exchange.status else {
        return Verdict::fail(format!(
            "request failed: {}",
            exchange.error.as_deref().unwrap_or("no response")
        ));
    };
    if status != case.expected_status {
        return Verdict::fail(format!(
            "expected status {}, got {}",
            case.expected_status, status
        ));
    }
    let missing: Vec<&str> = case
        .expect_keys
        .iter()
        .filter(|key| !has_key(&exchange.body, key))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        Verdict::pass()
    } else {
        Verdict::fail(format!("missing response keys: {}", missing.join(", ")))
    }
}

fn has_key(body: &Value, key: &str) -> bool {
    body.as_object().is_some_and(|object| object.contains_key(key))
}

/// Runs the selected cases in file order and records each outcome.
pub async fn run_suite(
    suite: &SuiteFile,
    client: &ApiClient,
    reporter: &Reporter,
    filter: &RunFilter,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    for case in &suite.cases {
        if !filter.selects(case) {
            debug!("Deselected {}", case.name);
            continue;
        }

        if let Some(reason) = case.skip_reason(&filter.environment) {
            info!("SKIPPED {}: {}", case.name, reason);
            let request = RequestInfo::without_timing(
                client.url_for(&case.endpoint),
                case.method.as_str(),
                BTreeMap::new(),
            );
            reporter.record(
                &case.name,
                TestStatus::Skipped,
                None,
                request,
                &json!({ "skipped": reason }),
            );
            outcome.count(&TestStatus::Skipped);
            continue;
        }

        let exchange = client.send(&case.to_request()).await;
        let verdict = evaluate(case, &exchange);
        match verdict.reason.as_deref() {
            Some(reason) => warn!("FAIL {}: {}", case.name, reason),
            None => info!(
                "PASS {} ({:.3}s)",
                case.name, exchange.request.time_duration
            ),
        }
        reporter.record(
            &case.name,
            verdict.status.clone(),
            exchange.status,
            exchange.request,
            &exchange.body,
        );
        outcome.count(&verdict.status);
    }
    outcome
}
