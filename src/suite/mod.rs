//! Declarative API test suites.
//!
//! A suite file lists `[[cases]]`; [`run_suite`] sends each selected case
//! through an [`crate::http::ApiClient`] and records one outcome per case
//! with the [`crate::report::Reporter`].
mod loader;
mod runner;
mod types;


pub use loader::{load_suite, save_suite};
pub use runner::{RunFilter, RunOutcome, Verdict, evaluate, run_suite};
pub use types::{DEFAULT_EXPECTED_STATUS, SuiteFile, TestCase};
