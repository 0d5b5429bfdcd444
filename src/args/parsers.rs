use crate::error::ValidationError;

pub fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// Accepts tags that are safe inside a report file name.
pub fn parse_report_tag(s: &str) -> Result<String, ValidationError> {
    let valid = !s.is_empty()
        && s
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'));
    if valid {
        Ok(s.to_owned())
    } else {
        Err(ValidationError::InvalidReportTag {
            value: s.to_owned(),
        })
    }
}

pub(crate) fn parse_environment(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyEnvironment);
    }
    Ok(trimmed.to_owned())
}
