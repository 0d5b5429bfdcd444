use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use apiregress::args::{CliArgs, Command, ImportCurlArgs, RenderArgs, RunArgs};
use apiregress::config::load_environments;
use apiregress::curl::import_curl_file;
use apiregress::error::AppResult;
use apiregress::http::{ApiClient, apply_header_layer};
use apiregress::report::{Reporter, timestamp_tag};
use apiregress::suite::{RunFilter, RunOutcome, load_suite, run_suite};

/// Every executed case passed (skipped cases do not count).
const EXIT_SUCCESS: u8 = 0;
/// At least one case failed.
const EXIT_TEST_FAILURE: u8 = 1;
/// Configuration, usage or I/O error before or instead of a run.
const EXIT_ERROR: u8 = 2;

pub(crate) fn run() -> ExitCode {
    let args = CliArgs::parse();
    crate::logger::init_logging(args.verbose, args.no_color);

    let result = match args.command {
        Command::Run(run_args) => run_tests(run_args),
        Command::Render(render_args) => render_reports(&render_args),
        Command::ImportCurl(import_args) => import_curl(&import_args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_tests(args: RunArgs) -> AppResult<u8> {
    let environments = load_environments(&args.config)?;
    let mut resolved = environments.resolve(&args.env)?;
    apply_header_layer(&mut resolved.headers, args.headers);

    let suite = load_suite(&args.suite)?;
    let client = ApiClient::new(&resolved)?;
    let environment = client.environment();
    let reporter = Reporter::new(args.report_dir);
    reporter.begin_run();

    let filter = RunFilter {
        environment: environment.name.clone(),
        keyword: args.tests,
    };
    info!(
        "Running {} case(s) against '{}' ({})",
        suite.cases.len(),
        environment.name,
        environment.base_url
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run_suite(&suite, &client, &reporter, &filter));

    let tag = timestamp_tag();
    if !args.no_xlsx {
        let xlsx = reporter.render_tabular(&environment.name, &tag);
        print_report("XLSX", xlsx.as_deref());
    }
    if !args.no_html {
        let html = reporter.render_report(&environment.name, &tag);
        print_report("HTML", html.as_deref());
    }
    print_outcome(&outcome);

    if outcome.all_passed() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_TEST_FAILURE)
    }
}

fn render_reports(args: &RenderArgs) -> AppResult<u8> {
    let reporter = Reporter::new(&args.report_dir);
    let tag = args.tag.clone().unwrap_or_else(timestamp_tag);
    let reports = reporter.render_all(&args.env, &tag);
    print_report("XLSX", reports.xlsx.as_deref());
    print_report("HTML", reports.html.as_deref());
    if reports.html.is_some() {
        Ok(EXIT_SUCCESS)
    } else {
        eprintln!("Error: HTML report could not be written.");
        Ok(EXIT_ERROR)
    }
}

fn import_curl(args: &ImportCurlArgs) -> AppResult<u8> {
    let (case, added) = import_curl_file(&args.curl_file, &args.suite)?;
    if added {
        println!(
            "Added {} {} as '{}' to {}",
            case.method,
            case.endpoint,
            case.name,
            args.suite.display()
        );
    } else {
        println!(
            "Case '{}' already exists in {}",
            case.name,
            args.suite.display()
        );
    }
    Ok(EXIT_SUCCESS)
}

fn print_report(kind: &str, path: Option<&Path>) {
    match path {
        Some(path) => println!("{} report: {}", kind, path.display()),
        None => println!("{} report: not written", kind),
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "{} passed, {} failed, {} skipped ({} total)",
        outcome.passed,
        outcome.failed,
        outcome.skipped,
        outcome.total()
    );
}
