//! Input validation utilities
//!
//! Species names arrive as URL path segments and are checked here before
//! any upstream is contacted.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SPECIES_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("species name pattern is valid"));

/// Validation errors that can occur during input validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is required but missing or empty
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// Field value doesn't match required pattern
    #[error("Field '{field}' must contain only alphabetic characters")]
    NotAlphabetic { field: String },
}

/// Check that `name` is a non-empty, purely alphabetic species identifier
pub fn validate_species_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if !SPECIES_NAME_PATTERN.is_match(name) {
        return Err(ValidationError::NotAlphabetic {
            field: "name".to_string(),
        });
    }

    Ok(())
}
