//! HTTP client wrapper used by the suite runner.
//!
//! [`ApiClient`] resolves endpoints against an environment's base URL, merges
//! the layered request headers and turns every exchange, including transport
//! failures, into an [`ApiExchange`] that can be recorded directly.
mod client;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{
    ApiClient, ApiExchange, ApiRequest, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, apply_header_layer,
    default_headers, join_url, merge_headers, parse_body,
};
