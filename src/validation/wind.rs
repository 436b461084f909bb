//! Wind forcing validation.
//!
//! File-backed fields are looked up on disk through the validation context.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::validation::ModelValidator;

/// Validator for wind fields.
pub struct WindValidator;

impl ModelValidator for WindValidator {
    fn name(&self) -> &str {
        "Wind"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let window = ctx.model.time_frame.run_window();
        let mut issues = Vec::new();

        for field in &ctx.model.wind {
            let subject = FeatureRef::new(FeatureKind::WindField, &field.name);
            if let Some(series) = field.source.series() {
                if series.is_empty() {
                    issues.push(ValidationIssue::error(
                        subject.clone(),
                        format!("Wind field '{}': time series contains no values.", field.name),
                    ));
                } else if !window.is_covered_by(series) {
                    issues.push(ValidationIssue::error(
                        subject.clone(),
                        format!(
                            "Wind field '{}': time series does not span the model run interval.",
                            field.name
                        ),
                    ));
                }
            }
            for file in field.source.files() {
                if !ctx.file_exists(file) {
                    issues.push(ValidationIssue::error(
                        subject.clone(),
                        format!("Wind field '{}': file '{}' does not exist.", field.name, file.display()),
                    ));
                }
            }
        }

        ValidationReport::leaf(self.name(), issues)
    }
}
