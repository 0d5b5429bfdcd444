//! Core library for the `apiregress` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, environment configuration, the HTTP client wrapper, declarative
//! test suites, the curl importer, and the result ledger with its XLSX and
//! HTML renderers. The primary user-facing interface is the `apiregress`
//! command-line application; test code that drives its own requests can use
//! [`report::Reporter`] directly.
pub mod args;
pub mod config;
pub mod curl;
pub mod error;
pub mod http;
pub mod report;
pub mod suite;
