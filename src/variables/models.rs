//! Variable data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named template variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Unique identifier, generated when the variable is created.
    pub id: String,

    /// Name referenced as `{{key}}` in requests.
    pub key: String,

    /// Replacement text.
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Variable {
    /// Creates a variable with a fresh id and creation timestamp.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            key: key.into(),
            value: value.into(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }
}

/// Input for creating a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
}

impl NewVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Errors raised when a variable edit is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableError {
    /// The key is empty or only whitespace.
    EmptyKey,

    /// Another variable already uses this key.
    DuplicateKey(String),

    /// No variable with this id exists.
    NotFound(String),
}

impl fmt::Display for VariableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableError::EmptyKey => write!(f, "Variable key must not be empty"),
            VariableError::DuplicateKey(key) => {
                write!(f, "A variable named '{}' already exists", key)
            }
            VariableError::NotFound(id) => write!(f, "Variable not found: {}", id),
        }
    }
}

impl std::error::Error for VariableError {}
