use std::time::Duration;

use tempfile::tempdir;

use super::load_environments;
use super::test_support::write_file;
use crate::error::{AppError, ConfigError};

const ENVIRONMENTS_TOML: &str = r#"
[environments.dev]
base_url = "http://localhost:3000/api"
auth_token = "secret"
timeout = 5

[environments.dev.headers]
x-client = "apiregress"

[environments.staging]
api_base_url = "https://staging.example.com"
"#;

#[test]
fn parse_toml_environments() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(&dir, "environments.toml", ENVIRONMENTS_TOML)?;

    let file = load_environments(&path).map_err(|err| err.to_string())?;
    if file.names() != ["dev", "staging"] {
        return Err(format!("Unexpected names: {:?}", file.names()));
    }

    let dev = file.resolve("dev").map_err(|err| err.to_string())?;
    if dev.name != "dev" || dev.base_url != "http://localhost:3000/api" {
        return Err(format!("Unexpected dev env: {:?}", dev));
    }
    if dev.auth_token.as_deref() != Some("secret") {
        return Err("Expected auth token".to_owned());
    }
    if dev.timeout != Duration::from_secs(5) {
        return Err(format!("Unexpected timeout: {:?}", dev.timeout));
    }
    if dev.headers.get("x-client").map(String::as_str) != Some("apiregress") {
        return Err("Expected x-client header".to_owned());
    }
    Ok(())
}

#[test]
fn api_base_url_alias_and_default_timeout() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(&dir, "environments.toml", ENVIRONMENTS_TOML)?;

    let staging = load_environments(&path)
        .and_then(|file| file.resolve("staging"))
        .map_err(|err| err.to_string())?;
    if staging.base_url != "https://staging.example.com" {
        return Err(format!("Unexpected base_url: {}", staging.base_url));
    }
    if staging.timeout != Duration::from_secs(super::DEFAULT_TIMEOUT_SECS) {
        return Err("Expected default timeout".to_owned());
    }
    if staging.auth_token.is_some() {
        return Err("Expected no auth token".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_environments() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(
        &dir,
        "environments.json",
        r#"{ "environments": { "lab": { "base_url": "http://lab", "auth_token": "  " } } }"#,
    )?;

    let lab = load_environments(&path)
        .and_then(|file| file.resolve("lab"))
        .map_err(|err| err.to_string())?;
    if lab.auth_token.is_some() {
        return Err("Blank token must resolve to none".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_environment_lists_available() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(&dir, "environments.toml", ENVIRONMENTS_TOML)?;
    let file = load_environments(&path).map_err(|err| err.to_string())?;

    match file.resolve("prod") {
        Err(AppError::Config(ConfigError::UnknownEnvironment { name, available })) => {
            if name != "prod" || available != "dev, staging" {
                return Err(format!("Unexpected error fields: {} / {}", name, available));
            }
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected unknown environment error".to_owned()),
    }
}

#[test]
fn rejects_conflicting_or_missing_base_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(
        &dir,
        "environments.toml",
        r#"
[environments.both]
base_url = "http://a"
api_base_url = "http://b"

[environments.none]
timeout = 3

[environments.zero]
base_url = "http://a"
timeout = 0
"#,
    )?;
    let file = load_environments(&path).map_err(|err| err.to_string())?;

    if !matches!(
        file.resolve("both"),
        Err(AppError::Config(ConfigError::BaseUrlConflict { .. }))
    ) {
        return Err("Expected base url conflict".to_owned());
    }
    if !matches!(
        file.resolve("none"),
        Err(AppError::Config(ConfigError::MissingBaseUrl { .. }))
    ) {
        return Err("Expected missing base url".to_owned());
    }
    if !matches!(
        file.resolve("zero"),
        Err(AppError::Config(ConfigError::TimeoutZero { .. }))
    ) {
        return Err("Expected zero timeout error".to_owned());
    }
    Ok(())
}

#[test]
fn rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(&dir, "environments.yaml", "environments: {}")?;
    match load_environments(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected unsupported extension".to_owned()),
    }
}
