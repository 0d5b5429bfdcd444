use std::iter::Peekable;
use std::str::Chars;

use crate::error::{AppError, AppResult, SuiteError};

/// Splits a shell command into words the way a POSIX shell would for the
/// subset of syntax found in exported curl commands.
///
/// # Errors
///
/// Returns an error when a quoted string is not closed.
pub fn tokenize(command: &str) -> AppResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = command.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_token = true;
                read_single_quoted(&mut chars, &mut current)?;
            }
            '"' => {
                in_token = true;
                read_double_quoted(&mut chars, &mut current)?;
            }
            '$' if chars.peek() == Some(&'\'') => {
                chars.next();
                in_token = true;
                read_ansi_c_quoted(&mut chars, &mut current)?;
            }
            '\\' => match chars.next() {
                Some('\n') | None => {}
                Some('\r') => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                }
                Some(escaped) => {
                    in_token = true;
                    current.push(escaped);
                }
            },
            ch if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            ch => {
                in_token = true;
                current.push(ch);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn unterminated() -> AppError {
    AppError::suite(SuiteError::CurlUnterminatedQuote)
}

fn read_single_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> AppResult<()> {
    loop {
        match chars.next() {
            Some('\'') => return Ok(()),
            Some(ch) => out.push(ch),
            None => return Err(unterminated()),
        }
    }
}

fn read_double_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> AppResult<()> {
    loop {
        match chars.next() {
            Some('"') => return Ok(()),
            Some('\\') => match chars.next() {
                Some(ch @ ('"' | '\\' | '$' | '`')) => out.push(ch),
                Some('\n') => {}
                Some(ch) => {
                    out.push('\\');
                    out.push(ch);
                }
                None => return Err(unterminated()),
            },
            Some(ch) => out.push(ch),
            None => return Err(unterminated()),
        }
    }
}

fn read_ansi_c_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> AppResult<()> {
    loop {
        match chars.next() {
            Some('\'') => return Ok(()),
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(ch @ ('\'' | '"' | '\\')) => out.push(ch),
                Some(ch) => {
                    out.push('\\');
                    out.push(ch);
                }
                None => return Err(unterminated()),
            },
            Some(ch) => out.push(ch),
            None => return Err(unterminated()),
        }
    }
}
