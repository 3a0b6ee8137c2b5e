//! Persistent, ordered variable store.
//!
//! The store performs no key validation of its own: uniqueness is checked by
//! the editing surface (see [`super::validation`]) before `add`/`update` are
//! called. Every mutation is written through to storage.

use super::models::{NewVariable, Variable};
use crate::storage::{load_json, save_json, SharedStorage, VARIABLES_KEY};
use chrono::Utc;

/// Ordered collection of variables backed by durable storage.
pub struct VariableStore {
    variables: Vec<Variable>,
    storage: SharedStorage,
}

impl VariableStore {
    /// Loads the store from storage. Absent or corrupt data yields an empty store.
    pub fn load(storage: SharedStorage) -> Self {
        let variables: Vec<Variable> = load_json(storage.as_ref(), VARIABLES_KEY);
        log::debug!("Loaded {} variables", variables.len());
        Self { variables, storage }
    }

    /// All variables in store order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// A copy of the current variables, used as a point-in-time snapshot
    /// for an outgoing request.
    pub fn snapshot(&self) -> Vec<Variable> {
        self.variables.clone()
    }

    /// Looks up a variable by id.
    pub fn get(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn find_by_key(&self, key: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.key == key)
    }

    /// Number of stored variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Appends a new variable with a fresh id and creation timestamp.
    pub fn add(&mut self, new: NewVariable) -> Variable {
        let variable = Variable::new(new.key, new.value);
        self.variables.push(variable.clone());
        self.persist();
        variable
    }

    /// Replaces the variable with the same id. Returns `false` if none matched.
    pub fn update(&mut self, variable: Variable) -> bool {
        let Some(slot) = self.variables.iter_mut().find(|v| v.id == variable.id) else {
            return false;
        };

        *slot = Variable {
            updated_at: Some(Utc::now()),
            ..variable
        };
        self.persist();
        true
    }

    /// Removes the variable with the given id. Returns `false` if none matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.variables.len();
        self.variables.retain(|v| v.id != id);
        let removed = self.variables.len() != before;
        self.persist();
        removed
    }

    fn persist(&self) {
        // Best effort: the in-memory store stays authoritative for the session
        if let Err(e) = save_json(self.storage.as_ref(), VARIABLES_KEY, &self.variables) {
            log::warn!("Failed to persist variables: {}", e);
        }
    }
}
