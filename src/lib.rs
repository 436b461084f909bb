//! # hydro-validate - Pre-run validation of hydrodynamic models
//!
//! hydro-validate inspects a read-only snapshot of a coupled 1D/2D
//! hydrodynamic model and reports every problem that would make a run fail
//! or misbehave, before the model is handed to the computational core.
//!
//! ## Features
//!
//! - **Independent validators**: each validator is a pure projection over the model snapshot
//! - **Report tree**: findings are grouped per category with Error, Warning and Info severities
//! - **Isolation**: a failing validator never prevents the others from running
//! - **Parallel execution**: validators can run on the rayon thread pool
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hydro_validate::prelude::*;
//!
//! let model = HydroModel::from_json(&std::fs::read_to_string("model.json")?)?;
//! let settings = ValidationSettings::default().with_min_segment_length(0.5);
//!
//! let report = ValidationPipeline::default_pipeline().validate(Some(&model), &settings)?;
//! for issue in report.all_issues() {
//!     println!("[{}] {}", issue.severity(), issue.message());
//! }
//! println!("{}", report.summary());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Issue and report model, errors, settings and the validation context
//! - [`model`]: The model snapshot the validators read
//! - [`validation`]: The validators and the pipeline running them
//!
//! ## Custom validators
//!
//! Implement the [`ModelValidator`](validation::ModelValidator) trait and add
//! it to a pipeline:
//!
//! ```rust,ignore
//! use hydro_validate::prelude::*;
//!
//! struct NamedModel;
//!
//! impl ModelValidator for NamedModel {
//!     fn name(&self) -> &str {
//!         "Naming"
//!     }
//!
//!     fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
//!         let mut issues = Vec::new();
//!         if ctx.model.name.is_empty() {
//!             issues.push(ValidationIssue::warning(
//!                 FeatureRef::new(FeatureKind::Model, ""),
//!                 "Model has no name.",
//!             ));
//!         }
//!         ValidationReport::leaf(self.name(), issues)
//!     }
//! }
//!
//! let mut pipeline = ValidationPipeline::default_pipeline();
//! pipeline.add_validator(Box::new(NamedModel));
//! ```

#![warn(clippy::all)]

pub mod core;
pub mod model;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use hydro_validate::prelude::*;
/// ```
pub mod prelude {
    // Report model
    pub use crate::core::report::{
        FeatureKind, FeatureRef, ValidationIssue, ValidationReport, ValidationSeverity,
    };

    // Errors, settings and context
    pub use crate::core::context::{DiskFiles, FileCheck, ValidationContext};
    pub use crate::core::error::{HydroError, HydroResult};
    pub use crate::core::settings::ValidationSettings;

    // Model snapshot
    pub use crate::model::HydroModel;

    // Validation
    pub use crate::validation::pipeline::ValidationPipeline;
    pub use crate::validation::ModelValidator;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
