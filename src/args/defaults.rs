pub const DEFAULT_USER_AGENT: &str = concat!("apiregress/", env!("CARGO_PKG_VERSION"));

/// Environment selected when `--env` is not given.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Suite file used when `--suite` is not given.
pub const DEFAULT_SUITE_FILE: &str = "suites/api.toml";
