use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum number of characters kept from a serialized response body.
pub const RESPONSE_BODY_LIMIT: usize = 1000;
/// Appended to a response body that was cut at [`RESPONSE_BODY_LIMIT`].
pub const TRUNCATION_MARKER: &str = "...";
/// Local capture time format used for [`ResultRecord::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Terminal classification of a test case.
///
/// Unknown status strings read back from a results file are kept as
/// [`TestStatus::Other`] so they still get their own chart slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Pass,
    Fail,
    Skipped,
    Other(String),
}

impl TestStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Skipped => "SKIPPED",
            TestStatus::Other(value) => value.as_str(),
        }
    }

    /// Lower-case token safe to use as a CSS class suffix.
    #[must_use]
    pub fn css_token(&self) -> String {
        let token: String = self
            .as_str()
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() {
                    ch.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        if token.is_empty() {
            "unknown".to_owned()
        } else {
            token
        }
    }
}

impl From<String> for TestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PASS" => TestStatus::Pass,
            "FAIL" => TestStatus::Fail,
            "SKIPPED" => TestStatus::Skipped,
            _ => TestStatus::Other(value),
        }
    }
}

impl From<&str> for TestStatus {
    fn from(value: &str) -> Self {
        TestStatus::from(value.to_owned())
    }
}

impl From<TestStatus> for String {
    fn from(value: TestStatus) -> Self {
        match value {
            TestStatus::Other(value) => value,
            TestStatus::Pass | TestStatus::Fail | TestStatus::Skipped => value.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request context captured alongside an outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInfo {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub time_duration: f64,
}

impl RequestInfo {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        method: &str,
        headers: BTreeMap<String, String>,
        time_duration: f64,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.to_ascii_uppercase(),
            headers,
            time_duration,
        }
    }

    /// Request context for an exchange that never produced timing, e.g. a
    /// transport failure before anything was sent.
    #[must_use]
    pub fn without_timing(
        url: impl Into<String>,
        method: &str,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self::new(url, method, headers, 0.0)
    }
}

/// One persisted test outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub test_name: String,
    pub status: TestStatus,
    #[serde(default)]
    pub response_code: Option<u16>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub response_body: String,
    #[serde(default)]
    pub time_duration: f64,
    #[serde(default)]
    pub timestamp: String,
}

impl ResultRecord {
    /// Builds a record stamped with the current local time.
    pub fn capture<B>(
        test_name: &str,
        status: TestStatus,
        response_code: Option<u16>,
        request: RequestInfo,
        response_body: &B,
    ) -> Self
    where
        B: Serialize + ?Sized,
    {
        Self {
            test_name: test_name.to_owned(),
            status,
            response_code,
            url: request.url,
            method: request.method,
            headers: request.headers,
            response_body: truncate_body(serialize_body(response_body)),
            time_duration: request.time_duration,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Serializes a response payload with sorted object keys.
///
/// Going through [`serde_json::Value`] sorts map keys, so hash maps with
/// arbitrary iteration order serialize identically on every call.
pub fn serialize_body<B>(body: &B) -> String
where
    B: Serialize + ?Sized,
{
    match serde_json::to_value(body) {
        Ok(value) => value.to_string(),
        Err(err) => {
            warn!("Response body is not serializable: {}", err);
            serde_json::json!({ "error": format!("unserializable response body: {}", err) })
                .to_string()
        }
    }
}

/// Cuts `body` to [`RESPONSE_BODY_LIMIT`] characters plus the marker.
#[must_use]
pub fn truncate_body(body: String) -> String {
    match body.char_indices().nth(RESPONSE_BODY_LIMIT) {
        Some((cut, _)) => {
            let mut truncated = body.get(..cut).unwrap_or_default().to_owned();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => body,
    }
}
