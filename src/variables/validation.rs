//! Key checks applied by the editing surface before a variable is committed.

use super::models::{Variable, VariableError};

/// Verifies that `key` is non-empty and not used by any other variable.
///
/// `editing_id` is the id of the variable being edited, which may keep its
/// own key. Keys are compared after trimming surrounding whitespace.
pub fn check_unique_key(
    variables: &[Variable],
    key: &str,
    editing_id: Option<&str>,
) -> Result<(), VariableError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(VariableError::EmptyKey);
    }

    let taken = variables
        .iter()
        .any(|v| v.key.trim() == key && Some(v.id.as_str()) != editing_id);

    if taken {
        return Err(VariableError::DuplicateKey(key.to_string()));
    }

    Ok(())
}
