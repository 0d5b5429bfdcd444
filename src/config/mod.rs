//! Environment configuration loading.
mod loader;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use loader::{DEFAULT_ENVIRONMENTS_FILE, load_environments};
pub use types::{DEFAULT_TIMEOUT_SECS, EnvironmentConfig, EnvironmentEntry, EnvironmentsFile};
