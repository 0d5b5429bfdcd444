use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_ENVIRONMENTS_FILE;
use crate::report::DEFAULT_REPORT_DIR;

use super::defaults::{DEFAULT_ENVIRONMENT, DEFAULT_SUITE_FILE};
use super::parsers::{parse_environment, parse_header, parse_report_tag};

#[derive(Debug, Parser, Clone)]
#[command(
    version,
    about = "API regression-test harness - runs declarative API suites against a named environment and renders XLSX/HTML reports."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the suite against an environment and render reports
    Run(RunArgs),
    /// Re-render reports from an existing results file
    Render(RenderArgs),
    /// Add a test case to the suite from a saved curl command
    ImportCurl(ImportCurlArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Environment to test (a key under [environments] in the config file)
    #[arg(long, env = "APIREGRESS_ENV", default_value = DEFAULT_ENVIRONMENT, value_parser = parse_environment)]
    pub env: String,

    /// Environments file (.toml or .json)
    #[arg(long, short, default_value = DEFAULT_ENVIRONMENTS_FILE)]
    pub config: PathBuf,

    /// Suite file (.toml or .json)
    #[arg(long, short, default_value = DEFAULT_SUITE_FILE)]
    pub suite: PathBuf,

    /// Output root for results and reports
    #[arg(long = "report-dir", default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Only run cases whose name contains this keyword
    #[arg(long = "tests", short = 'k')]
    pub tests: Option<String>,

    /// Extra header sent with every request, 'Key: Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Skip the XLSX report
    #[arg(long = "no-xlsx")]
    pub no_xlsx: bool,

    /// Skip the HTML report
    #[arg(long = "no-html")]
    pub no_html: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Environment label used in report file names
    #[arg(long, env = "APIREGRESS_ENV", default_value = DEFAULT_ENVIRONMENT, value_parser = parse_environment)]
    pub env: String,

    /// Output root holding json/test_results.json
    #[arg(long = "report-dir", default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Report file tag (defaults to the current local time, YYYYMMDD_HHMMSS)
    #[arg(long, value_parser = parse_report_tag)]
    pub tag: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ImportCurlArgs {
    /// File holding a single curl command
    #[arg(long = "curl-file", default_value = "curl.txt")]
    pub curl_file: PathBuf,

    /// Suite file to add the case to (created when missing)
    #[arg(long, short, default_value = DEFAULT_SUITE_FILE)]
    pub suite: PathBuf,
}
