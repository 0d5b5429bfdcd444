use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::args::{DEFAULT_USER_AGENT, HttpMethod};
use crate::config::EnvironmentConfig;
use crate::error::{AppError, AppResult, HttpError};
use crate::report::RequestInfo;

pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// One request as described by a suite case.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
    pub include_auth: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            headers: BTreeMap::new(),
            include_auth: true,
        }
    }
}

/// Outcome of [`ApiClient::send`].
///
/// `status` is `None` and `error` is set when no response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiExchange {
    pub request: RequestInfo,
    pub status: Option<u16>,
    pub body: Value,
    pub error: Option<String>,
}

impl ApiExchange {
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        self.status.is_none()
    }

    fn failed(request: RequestInfo, message: String) -> Self {
        Self {
            request,
            status: None,
            body: json!({ "error": message }),
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: EnvironmentConfig,
}

impl ApiClient {
    /// Builds a client bound to one environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(environment: &EnvironmentConfig) -> AppResult<Self> {
        Url::parse(&environment.base_url).map_err(|source| {
            AppError::http(HttpError::InvalidUrl {
                url: environment.base_url.clone(),
                source,
            })
        })?;

        let client = Client::builder()
            .timeout(environment.timeout)
            .build()
            .map_err(|source| AppError::http(HttpError::BuildClient { source }))?;

        Ok(Self {
            client,
            environment: environment.clone(),
        })
    }

    #[must_use]
    pub const fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        join_url(&self.environment.base_url, endpoint)
    }

    /// Headers that [`ApiClient::send`] would put on `request`.
    #[must_use]
    pub fn headers_for(&self, request: &ApiRequest) -> BTreeMap<String, String> {
        let token = if request.include_auth {
            self.environment.auth_token.as_deref()
        } else {
            None
        };
        merge_headers(token, &self.environment.headers, &request.headers)
    }

    /// Sends `request` and captures the exchange.
    ///
    /// Never fails: transport errors come back as an exchange with no status,
    /// zero duration and an `{"error": ...}` body.
    pub async fn send(&self, request: &ApiRequest) -> ApiExchange {
        let url = self.url_for(&request.endpoint);
        let method = request.method.as_str();
        let headers = self.headers_for(request);

        let header_map = match build_header_map(&headers) {
            Ok(map) => map,
            Err(err) => {
                warn!("Request to '{}' not sent: {}", url, err);
                return ApiExchange::failed(
                    RequestInfo::without_timing(&url, method, headers),
                    err.to_string(),
                );
            }
        };

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &url)
            .headers(header_map);
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        debug!("{} {}", method, url);
        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("{} {} failed: {}", method, url, err);
                return ApiExchange::failed(
                    RequestInfo::without_timing(&url, method, headers),
                    err.to_string(),
                );
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await;
        let elapsed = started.elapsed().as_secs_f64();
        let request_info = RequestInfo::new(&url, method, headers, elapsed);

        match text {
            Ok(text) => {
                debug!("{} {} -> {} in {:.3}s", method, url, status, elapsed);
                ApiExchange {
                    request: request_info,
                    status: Some(status),
                    body: parse_body(&text),
                    error: None,
                }
            }
            Err(err) => {
                warn!("{} {} -> {} but body read failed: {}", method, url, status, err);
                let message = err.to_string();
                ApiExchange {
                    request: request_info,
                    status: Some(status),
                    body: json!({ "error": message }),
                    error: Some(message),
                }
            }
        }
    }
}

/// Headers sent with every request before any layer overrides them.
#[must_use]
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("accept".to_owned(), DEFAULT_ACCEPT.to_owned()),
        ("accept-language".to_owned(), DEFAULT_ACCEPT_LANGUAGE.to_owned()),
        ("user-agent".to_owned(), DEFAULT_USER_AGENT.to_owned()),
    ])
}

/// Layers defaults, bearer auth, environment headers and custom headers.
///
/// Keys are lower-cased so a later layer replaces an earlier one regardless
/// of spelling.
#[must_use]
pub fn merge_headers(
    auth_token: Option<&str>,
    environment: &BTreeMap<String, String>,
    custom: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = default_headers();
    if let Some(token) = auth_token {
        merged.insert("authorization".to_owned(), format!("Bearer {}", token));
    }
    for layer in [environment, custom] {
        apply_header_layer(
            &mut merged,
            layer.iter().map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    merged
}

/// Applies `layer` over `headers` with lower-cased keys, so a layer entry
/// replaces an existing header whatever its spelling.
pub fn apply_header_layer<I>(headers: &mut BTreeMap<String, String>, layer: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    let existing = std::mem::take(headers);
    *headers = existing
        .into_iter()
        .chain(layer)
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value))
        .collect();
}

/// Joins `endpoint` onto `base_url` with exactly one `/` between them.
/// Absolute endpoints are returned unchanged.
#[must_use]
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_owned();
    }
    let base = base_url.trim().trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    if path.is_empty() {
        base.to_owned()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Parses a response body as JSON, keeping non-JSON text as a JSON string.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|source| HttpError::InvalidHeaderName {
            name: key.clone(),
            source,
        })?;
        let value = HeaderValue::from_str(value)
            .map_err(|source| HttpError::InvalidHeaderValue {
            name: key.clone(),
            source,
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
