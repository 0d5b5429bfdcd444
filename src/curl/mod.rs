//! Turns a saved `curl` command into a suite case.
//!
//! Browser dev tools export requests as multi-line shell commands; the
//! tokenizer understands the quoting those exports use, including `\` line
//! continuations and `$'...'` strings.
mod import;
mod parse;
mod tokenize;


pub use import::{append_case, import_curl_file, read_curl_file};
pub use parse::{CurlRequest, parse_curl};
pub use tokenize::tokenize;
