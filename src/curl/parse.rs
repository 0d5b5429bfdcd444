use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, HttpError, SuiteError};
use crate::suite::TestCase;

use super::tokenize::tokenize;

/// Options whose value is consumed and ignored.
const IGNORED_VALUE_OPTIONS: &[&str] = &[
    "-o",
    "--output",
    "-u",
    "--user",
    "-x",
    "--proxy",
    "-m",
    "--max-time",
    "--connect-timeout",
    "-w",
    "--write-out",
    "--cacert",
    "--cert",
    "--key",
    "-F",
    "--form",
    "-T",
    "--upload-file",
    "--retry",
    "-r",
    "--range",
    "--resolve",
    "-c",
    "--cookie-jar",
    "-K",
    "--config",
];

/// Headers never copied into a suite case.
const DROPPED_HEADERS: &[&str] = &["authorization", "content-length", "host"];

/// The parts of a curl command a suite case needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl CurlRequest {
    /// Path relative to the API root: everything after the last `/api/`, or
    /// the last path segment when the URL has no `/api/`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.url.rsplit_once("/api/").map_or_else(
            || self.url.rsplit('/').next().unwrap_or_default(),
            |(_, endpoint)| endpoint,
        )
    }

    /// `test_<method>_<endpoint>` with `/` and `-` turned into `_`.
    #[must_use]
    pub fn case_name(&self) -> String {
        let endpoint: String = self
            .endpoint()
            .chars()
            .map(|ch| if matches!(ch, '/' | '-') { '_' } else { ch })
            .collect();
        format!(
            "test_{}_{}",
            self.method.as_str().to_ascii_lowercase(),
            endpoint
        )
    }

    #[must_use]
    pub fn to_case(&self) -> TestCase {
        let mut case = TestCase::new(self.case_name(), self.method, self.endpoint());
        case.headers = self
            .headers
            .iter()
            .filter(|(key, _)| {
                !DROPPED_HEADERS
                    .iter()
                    .any(|dropped| key.eq_ignore_ascii_case(dropped))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        case.body = self.body.as_deref().map(|body| {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
        });
        case
    }
}

/// Parses a single curl command.
///
/// # Errors
///
/// Returns an error when the input is empty, is not a curl command, has no
/// URL, leaves an option without its value, or names an unsupported method.
pub fn parse_curl(command: &str) -> AppResult<CurlRequest> {
    let tokens = tokenize(command)?;
    let mut tokens = tokens.into_iter();
    let program = tokens
        .next()
        .ok_or_else(|| AppError::suite(SuiteError::CurlEmpty))?;
    if !is_curl(&program) {
        return Err(AppError::suite(SuiteError::CurlMissingCommand));
    }

    let mut method: Option<String> = None;
    let mut url: Option<String> = None;
    let mut headers = BTreeMap::new();
    let mut data: Vec<String> = Vec::new();
    let mut head = false;
    let mut force_get = false;

    while let Some(token) = tokens.next() {
        let (option, inline) = split_long_option(&token);
        let mut value = |name: &str| -> AppResult<String> {
            match inline.clone() {
                Some(inline_value) => Ok(inline_value),
                None => tokens.next().ok_or_else(|| {
                    AppError::suite(SuiteError::CurlMissingValue {
                        option: name.to_owned(),
                    })
                }),
            }
        };
        match option {
            "-X" | "--request" => method = Some(value(option)?),
            "-H" | "--header" => {
                if let Some((key, header_value)) = value(option)?.split_once(':') {
                    headers.insert(key.trim().to_owned(), header_value.trim().to_owned());
                }
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii"
            | "--data-urlencode" => data.push(value(option)?),
            "--json" => {
                data.push(value(option)?);
                headers
                    .entry("Content-Type".to_owned())
                    .or_insert_with(|| "application/json".to_owned());
            }
            "--url" => url = Some(value(option)?),
            "-A" | "--user-agent" => {
                headers.insert("User-Agent".to_owned(), value(option)?);
            }
            "-b" | "--cookie" => {
                headers.insert("Cookie".to_owned(), value(option)?);
            }
            "-e" | "--referer" => {
                headers.insert("Referer".to_owned(), value(option)?);
            }
            "-I" | "--head" => head = true,
            "-G" | "--get" => force_get = true,
            other if IGNORED_VALUE_OPTIONS.contains(&other) => {
                value(option)?;
            }
            other if other.starts_with("-X") && other.len() > 2 => {
                method = other.get(2..).map(str::to_owned);
            }
            other if other.starts_with('-') => debug!("Ignoring curl flag {}", other),
            other => {
                if url.is_none() {
                    url = Some(other.to_owned());
                } else {
                    debug!("Ignoring extra curl argument {}", other);
                }
            }
        }
    }

    let mut url = url.ok_or_else(|| AppError::suite(SuiteError::CurlMissingUrl))?;
    let mut body = (!data.is_empty()).then(|| data.join("&"));
    if force_get {
        if let Some(query) = body.take() {
            let separator = if url.contains('?') { '&' } else { '?' };
            url = format!("{}{}{}", url, separator, query);
        }
    }

    let method = match method {
        Some(name) => match name.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(reason) => {
                debug!("{}", reason);
                return Err(AppError::http(HttpError::InvalidMethod { method: name }));
            }
        },
        None if body.is_some() => HttpMethod::Post,
        None if head => HttpMethod::Head,
        None => HttpMethod::Get,
    };

    Ok(CurlRequest {
        method,
        url,
        headers,
        body,
    })
}

fn is_curl(program: &str) -> bool {
    let name = program.rsplit(['/', '\\']).next().unwrap_or(program);
    name.eq_ignore_ascii_case("curl") || name.eq_ignore_ascii_case("curl.exe")
}

/// Splits `--name=value` into the option and its inline value.
fn split_long_option(token: &str) -> (&str, Option<String>) {
    if token.starts_with("--") {
        if let Some((name, value)) = token.split_once('=') {
            return (name, Some(value.to_owned()));
        }
    }
    (token, None)
}
