//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: configuration loading, startup
//! validation, rejected calculator input and bracket lookup misses.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::Violation;

/// The main error type for the payroll calculation engine.
///
/// Configuration and validation errors are fatal at startup; input and
/// lookup errors reject a single calculation call without partial results.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll/main.json".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/payroll/main.json"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The master manifest does not declare a required section.
    #[error("Configuration section '{section}' is not declared in the manifest")]
    MissingSection {
        /// The section key that was missing.
        section: String,
    },

    /// The loaded configuration broke one or more validation rules.
    #[error("Configuration validation failed: {}", join_violations(.violations))]
    ValidationFailed {
        /// Every rule that failed, in evaluation order.
        violations: Vec<Violation>,
    },

    /// A calculator received input it cannot compute with.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending argument.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A bracket table had no rows to select from.
    #[error("Bracket table '{table}' is empty")]
    EmptyTable {
        /// The table that was empty.
        table: String,
    },

    /// No bracket in the table covers the given value.
    #[error("No bracket in table '{table}' covers value {value}")]
    BracketNotFound {
        /// The table that was searched.
        table: String,
        /// The value that was not covered.
        value: Decimal,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidInput`] for a negative amount.
    pub(crate) fn negative(field: &str, value: Decimal) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Rejects negative amounts before any arithmetic happens.
pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::negative(field, value));
    }
    Ok(())
}
