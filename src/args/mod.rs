//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{CliArgs, Command, ImportCurlArgs, RenderArgs, RunArgs};
pub use defaults::{DEFAULT_ENVIRONMENT, DEFAULT_SUITE_FILE, DEFAULT_USER_AGENT};
pub use parsers::{parse_header, parse_report_tag};
pub use types::HttpMethod;
