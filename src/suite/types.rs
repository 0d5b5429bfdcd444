use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::HttpMethod;
use crate::http::ApiRequest;

pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// Top-level shape of a suite file.
///
/// ```toml
/// [[cases]]
/// name = "test_get_me"
/// method = "get"
/// endpoint = "me"
/// expect_keys = ["user"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SuiteFile {
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl SuiteFile {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cases.iter().any(|case| case.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
    /// Top-level keys the JSON response object must contain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expect_keys: Vec<String>,
    /// Environments the case runs in; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    /// Reason for skipping the case unconditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    #[serde(default = "default_include_auth", skip_serializing_if = "is_true")]
    pub include_auth: bool,
}

const fn default_expected_status() -> u16 {
    DEFAULT_EXPECTED_STATUS
}

const fn default_include_auth() -> bool {
    true
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes fields by reference"
)]
const fn is_true(value: &bool) -> bool {
    *value
}

impl TestCase {
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            body: None,
            headers: BTreeMap::new(),
            expected_status: DEFAULT_EXPECTED_STATUS,
            expect_keys: Vec::new(),
            environments: Vec::new(),
            skip: None,
            include_auth: true,
        }
    }

    #[must_use]
    pub fn runs_in(&self, environment: &str) -> bool {
        self.environments.is_empty()
            || self
                .environments
                .iter()
                .any(|name| name.eq_ignore_ascii_case(environment))
    }

    /// Why the case is not sent in `environment`, if it is not.
    #[must_use]
    pub fn skip_reason(&self, environment: &str) -> Option<String> {
        if let Some(reason) = self.skip.as_ref() {
            return Some(reason.clone());
        }
        if self.runs_in(environment) {
            None
        } else {
            Some(format!(
                "not enabled for environment '{}' (runs in: {})",
                environment,
                self.environments.join(", ")
            ))
        }
    }

    #[must_use]
    pub fn to_request(&self) -> ApiRequest {
        ApiRequest {
            method: self.method,
            endpoint: self.endpoint.clone(),
            body: self.body.clone(),
            headers: self.headers.clone(),
            include_auth: self.include_auth,
        }
    }
}
