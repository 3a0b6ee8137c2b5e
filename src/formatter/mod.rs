//! Response formatting for display.
//!
//! Derives a `(value, language)` pair from the response fields of a draft.
//! Error responses are always shown as plain text; successful JSON responses
//! are pretty-printed, falling back to the raw text with a warning when the
//! body does not parse.

pub mod json;

use crate::draft::RequestDraft;
use std::fmt;

/// Fixed display for a 404 response.
pub const NOT_FOUND_TEXT: &str = "404 Not Found";

/// Errors that can occur during formatting.
///
/// These never fail a submission: they are reported as warnings next to a
/// plain-text fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The body was declared as JSON but did not parse.
    InvalidJson(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidJson(msg) => write!(f, "Failed to parse JSON response: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Language tag of the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayLanguage {
    Json,
    Plaintext,
}

impl DisplayLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayLanguage::Json => "json",
            DisplayLanguage::Plaintext => "plaintext",
        }
    }
}

impl fmt::Display for DisplayLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub value: String,
    pub language: DisplayLanguage,
}

impl DisplayText {
    pub fn plaintext(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: DisplayLanguage::Plaintext,
        }
    }

    pub fn json(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: DisplayLanguage::Json,
        }
    }

    pub fn empty() -> Self {
        Self::plaintext("")
    }
}

/// Display text plus an optional recoverable warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub display: DisplayText,
    pub warning: Option<FormatError>,
}

impl FormatOutcome {
    fn clean(display: DisplayText) -> Self {
        Self {
            display,
            warning: None,
        }
    }
}

/// Formats response fields for display.
///
/// # Arguments
///
/// * `data` - Raw response body, if any
/// * `content_type` - The response `Content-Type` header
/// * `status` - The HTTP status of the response
/// * `is_loading` - Whether a submission is still in flight
///
/// # Returns
///
/// The display text and its language. A JSON body that fails to parse is
/// shown as plaintext and the outcome carries the parse warning.
///
/// # Examples
///
/// ```
/// use rest_workbench::formatter::{format_response, DisplayLanguage};
///
/// let outcome = format_response(Some(r#"{"a":1}"#), Some("application/json"), Some(201), false);
/// assert_eq!(outcome.display.value, "{\n  \"a\": 1\n}");
/// assert_eq!(outcome.display.language, DisplayLanguage::Json);
/// ```
pub fn format_response(
    data: Option<&str>,
    content_type: Option<&str>,
    status: Option<u16>,
    is_loading: bool,
) -> FormatOutcome {
    if is_loading {
        return FormatOutcome::clean(DisplayText::empty());
    }

    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return FormatOutcome::clean(DisplayText::empty()),
    };

    match status {
        Some(404) => FormatOutcome::clean(DisplayText::plaintext(NOT_FOUND_TEXT)),
        Some(status) if status >= 400 => {
            let message = json::error_field(data).unwrap_or_else(|| data.to_string());
            FormatOutcome::clean(DisplayText::plaintext(message))
        }
        _ => format_success(data, content_type),
    }
}

/// Formats the response fields of `draft`.
pub fn format_draft_response(draft: &RequestDraft) -> FormatOutcome {
    format_response(
        draft.response_data.as_deref(),
        draft.response_content_type.as_deref(),
        draft.response_status,
        draft.is_loading,
    )
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

fn format_success(data: &str, content_type: Option<&str>) -> FormatOutcome {
    if !is_json_content_type(content_type) {
        return FormatOutcome::clean(DisplayText::plaintext(data));
    }

    match json::format_json_pretty(data) {
        Ok(pretty) => FormatOutcome::clean(DisplayText::json(pretty)),
        Err(err) => {
            log::warn!("{}; showing raw response", err);
            FormatOutcome {
                display: DisplayText::plaintext(data),
                warning: Some(err),
            }
        }
    }
}
