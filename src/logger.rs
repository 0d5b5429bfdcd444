use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used with `--verbose`; dependency crates stay at `info`.
const VERBOSE_FILTER: &str = "info,apiregress=debug";
const DEFAULT_FILTER: &str = "info";

pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("APIREGRESS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new(VERBOSE_FILTER)
                } else {
                    EnvFilter::new(DEFAULT_FILTER)
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true);
        init_logging(true, true);
    }
}
