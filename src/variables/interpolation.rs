//! Template interpolation for the REST workbench
//!
//! Replaces `{{key}}` references (optional whitespace inside the braces) with
//! variable values. Variables are applied one after another in store order,
//! so a later variable can rewrite text introduced by an earlier replacement.
//! Unresolved references are left in the output verbatim.

use super::models::Variable;
use crate::models::KeyValueEntry;
use regex::{NoExpand, RegexBuilder};
use std::fmt;

/// Upper bound on the compiled size of a single reference pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Errors raised while interpolating text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// The reference pattern for a variable key could not be built.
    InvalidPattern { key: String, reason: String },
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationError::InvalidPattern { key, reason } => {
                write!(f, "Cannot interpolate variable '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for InterpolationError {}

/// Resolves `{{key}}` references in `text` against `variables`.
///
/// # Examples
///
/// ```
/// use rest_workbench::variables::{interpolate, Variable};
///
/// let vars = vec![Variable::new("a", "x"), Variable::new("b", "y")];
/// assert_eq!(interpolate("{{a}}{{ b }}", &vars).unwrap(), "xy");
/// assert_eq!(interpolate("{{missing}}", &vars).unwrap(), "{{missing}}");
/// ```
pub fn interpolate(text: &str, variables: &[Variable]) -> Result<String, InterpolationError> {
    // Fast path: nothing to resolve
    if text.is_empty() || variables.is_empty() {
        return Ok(text.to_string());
    }

    let mut result = text.to_string();

    for variable in variables {
        if !result.contains("{{") {
            break;
        }

        let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(&variable.key));
        let re = RegexBuilder::new(&pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| InterpolationError::InvalidPattern {
                key: variable.key.clone(),
                reason: e.to_string(),
            })?;

        result = re
            .replace_all(&result, NoExpand(&variable.value))
            .into_owned();
    }

    Ok(result)
}

/// Interpolates the value of every row, leaving keys and ids untouched.
pub fn interpolate_entries(
    entries: &[KeyValueEntry],
    variables: &[Variable],
) -> Result<Vec<KeyValueEntry>, InterpolationError> {
    entries
        .iter()
        .map(|entry| {
            Ok(KeyValueEntry {
                value: interpolate(&entry.value, variables)?,
                ..entry.clone()
            })
        })
        .collect()
}
