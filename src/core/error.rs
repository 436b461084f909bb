//! Error types for hydro-validate.
//!
//! Uses thiserror for structured errors. These cover contract violations and
//! I/O around the engine only: problems found in a model are never errors,
//! they are reported as [`ValidationIssue`](crate::core::report::ValidationIssue)s.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("No model supplied for validation")]
    MissingModel,

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSettings { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings file error: {0}")]
    Settings(#[from] toml::de::Error),
}

impl HydroError {
    /// Build an [`HydroError::InvalidSettings`].
    pub fn invalid_setting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HydroError::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any validator ran.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, HydroError::MissingModel | HydroError::InvalidSettings { .. })
    }
}

/// Result type alias for hydro-validate operations.
pub type HydroResult<T> = Result<T, HydroError>;
