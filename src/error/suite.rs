use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Failed to read suite '{path}': {source}")]
    ReadSuite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML suite '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON suite '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize suite '{path}': {message}")]
    Serialize { path: PathBuf, message: String },
    #[error("Failed to write suite '{path}': {source}")]
    WriteSuite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported suite extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Suite file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Suite case {index} has an empty name.")]
    EmptyCaseName { index: usize },
    #[error("Suite case '{name}' has an empty endpoint.")]
    EmptyEndpoint { name: String },
    #[error("Failed to read curl file '{path}': {source}")]
    ReadCurl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("curl command is empty.")]
    CurlEmpty,
    #[error("Input does not start with 'curl'.")]
    CurlMissingCommand,
    #[error("No URL found in curl command.")]
    CurlMissingUrl,
    #[error("Option '{option}' expects a value.")]
    CurlMissingValue { option: String },
    #[error("Unterminated quote in curl command.")]
    CurlUnterminatedQuote,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
