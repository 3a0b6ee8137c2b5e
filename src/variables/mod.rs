//! Variables module for the REST workbench
//!
//! This module provides the user-defined variable store, the `{{key}}`
//! interpolator that resolves references against it, and the key checks the
//! editing surface applies before committing a change.

pub mod interpolation;
pub mod models;
pub mod store;
pub mod validation;

pub use interpolation::{interpolate, interpolate_entries, InterpolationError};
pub use models::{NewVariable, Variable, VariableError};
pub use store::VariableStore;
pub use validation::check_unique_key;
