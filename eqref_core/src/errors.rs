//! # Error Types
//!
//! Structured error types for eqref_core. Every failure here is recoverable at
//! the calling layer: a solve that cannot produce a number, a catalog that could
//! not be fetched, or a lookup that missed.
//!
//! Two outcomes that look like failures are deliberately *not* errors:
//!
//! - an input that is blank or non-numeric is simply not known
//!   ([`InputState::NotKnown`](crate::solvability::InputState::NotKnown))
//! - zero or several unknowns is a display state of the reducer
//!   ([`Solvability`](crate::solvability::Solvability))
//!
//! ## Example
//!
//! ```rust
//! use eqref_core::errors::{EqRefError, EqRefResult};
//!
//! fn require_positive(field: &str, value: f64) -> EqRefResult<f64> {
//!     if value <= 0.0 {
//!         return Err(EqRefError::invalid_input(field, value.to_string(), "must be positive"));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(require_positive("builtin_count", -1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for eqref_core operations
pub type EqRefResult<T> = Result<T, EqRefError>;

/// Structured error type for catalog and solver operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EqRefError {
    /// No inverse has been authored for this (equation, symbol) pair
    #[error("No closed form for '{symbol}' in equation {equation_id}")]
    NoClosedForm { equation_id: String, symbol: String },

    /// An authored inverse produced NaN or an infinity
    #[error("Non-finite result solving '{symbol}' in equation {equation_id}: {value}")]
    NonFinite {
        equation_id: String,
        symbol: String,
        value: String,
    },

    /// An inverse needed a value that was not in the known set
    #[error("Missing known value for '{symbol}' in equation {equation_id}")]
    MissingValue { equation_id: String, symbol: String },

    /// The catalog provider failed; the registry fell back
    #[error("Catalog unavailable from {source_name}: {reason}")]
    CatalogUnavailable { source_name: String, reason: String },

    /// Catalog data violates a structural invariant
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// Equation id not present in the registry
    #[error("Equation not found: {equation_id}")]
    EquationNotFound { equation_id: String },

    /// Variable id or symbol not present in the equation
    #[error("Variable '{variable}' not found in equation {equation_id}")]
    VariableNotFound {
        equation_id: String,
        variable: String,
    },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Catalog document version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EqRefError {
    /// Create a NoClosedForm error
    pub fn no_closed_form(equation_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        EqRefError::NoClosedForm {
            equation_id: equation_id.into(),
            symbol: symbol.into(),
        }
    }

    /// Create a NonFinite error from the offending value
    pub fn non_finite(equation_id: impl Into<String>, symbol: impl Into<String>, value: f64) -> Self {
        EqRefError::NonFinite {
            equation_id: equation_id.into(),
            symbol: symbol.into(),
            value: value.to_string(),
        }
    }

    /// Create a MissingValue error
    pub fn missing_value(equation_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        EqRefError::MissingValue {
            equation_id: equation_id.into(),
            symbol: symbol.into(),
        }
    }

    /// Create a CatalogUnavailable error
    pub fn catalog_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        EqRefError::CatalogUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidCatalog error
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        EqRefError::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Create an EquationNotFound error
    pub fn equation_not_found(equation_id: impl Into<String>) -> Self {
        EqRefError::EquationNotFound {
            equation_id: equation_id.into(),
        }
    }

    /// Create a VariableNotFound error
    pub fn variable_not_found(equation_id: impl Into<String>, variable: impl Into<String>) -> Self {
        EqRefError::VariableNotFound {
            equation_id: equation_id.into(),
            variable: variable.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EqRefError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EqRefError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the outcomes a result panel shows as "Cannot calculate"
    pub fn is_solve_failure(&self) -> bool {
        matches!(
            self,
            EqRefError::NoClosedForm { .. } | EqRefError::NonFinite { .. } | EqRefError::MissingValue { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EqRefError::NoClosedForm { .. } => "NO_CLOSED_FORM",
            EqRefError::NonFinite { .. } => "NON_FINITE",
            EqRefError::MissingValue { .. } => "MISSING_VALUE",
            EqRefError::CatalogUnavailable { .. } => "CATALOG_UNAVAILABLE",
            EqRefError::InvalidCatalog { .. } => "INVALID_CATALOG",
            EqRefError::EquationNotFound { .. } => "EQUATION_NOT_FOUND",
            EqRefError::VariableNotFound { .. } => "VARIABLE_NOT_FOUND",
            EqRefError::InvalidInput { .. } => "INVALID_INPUT",
            EqRefError::FileError { .. } => "FILE_ERROR",
            EqRefError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EqRefError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EqRefError::no_closed_form("eq_4", "P_1");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"NoClosedForm\""), "json = {}", json);
        let roundtrip: EqRefError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EqRefError::no_closed_form("eq_1", "V").error_code(), "NO_CLOSED_FORM");
        assert_eq!(EqRefError::non_finite("eq_5", "Re", f64::INFINITY).error_code(), "NON_FINITE");
        assert_eq!(
            EqRefError::catalog_unavailable("remote", "timeout").error_code(),
            "CATALOG_UNAVAILABLE"
        );
    }

    #[test]
    fn test_solve_failures_are_distinguished() {
        assert!(EqRefError::no_closed_form("eq_1", "V").is_solve_failure());
        assert!(EqRefError::non_finite("eq_1", "V", f64::NAN).is_solve_failure());
        assert!(!EqRefError::equation_not_found("eq_999").is_solve_failure());
    }

    #[test]
    fn test_non_finite_message() {
        let err = EqRefError::non_finite("eq_5", "ρ", f64::INFINITY);
        assert_eq!(err.to_string(), "Non-finite result solving 'ρ' in equation eq_5: inf");
    }
}
