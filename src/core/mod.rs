//! Core types of the validation engine.
//!
//! This module contains the pieces every validator shares:
//! - Issue and report types
//! - Error types
//! - Validation settings
//! - The validation context handed to each validator

pub mod context;
pub mod error;
pub mod report;
pub mod settings;

pub use context::{DiskFiles, FileCheck, ValidationContext};
pub use error::{HydroError, HydroResult};
pub use report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport, ValidationSeverity};
pub use settings::ValidationSettings;
