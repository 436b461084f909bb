//! Numerical parameter validation.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::definition::BedLevelType;
use crate::validation::ModelValidator;

/// Validity range of the time integration theta.
const TETA0_RANGE: std::ops::RangeInclusive<f64> = 0.5..=1.0;

/// Validity range of the number of vertical layers.
const KMX_RANGE: std::ops::RangeInclusive<i32> = 0..=99;

/// Validator for the model definition parameters.
pub struct ModelDefinitionValidator;

impl ModelValidator for ModelDefinitionValidator {
    fn name(&self) -> &str {
        "Model definition"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let parameters = &model.parameters;
        let subject = FeatureRef::new(FeatureKind::ModelDefinition, &model.name);
        let mut issues = Vec::new();

        if !TETA0_RANGE.contains(&parameters.teta0) {
            issues.push(ValidationIssue::error(
                subject.clone(),
                "Parameter Teta0 outside validity range [0.50,1.00].",
            ));
        }

        if !KMX_RANGE.contains(&parameters.kmx) {
            issues.push(ValidationIssue::error(
                subject.clone(),
                "Parameter Kmx outside validity range  [0,99].",
            ));
        }
        if parameters.kmx > 0 && parameters.dz_top <= 0.0 {
            issues.push(ValidationIssue::error(
                subject.clone(),
                "Parameter DzTop should be > 0.00.",
            ));
        }

        if model.morphology_active() {
            if parameters.bed_level_type != BedLevelType::Faces {
                issues.push(ValidationIssue::error(
                    subject.clone(),
                    "Bed level locations should be set to 'faces' when morphology is active.",
                ));
            }
            if parameters.conveyance_2d.is_analytic() {
                issues.push(ValidationIssue::error(
                    subject,
                    format!(
                        "Conveyance 2D type '{}' is not supported when morphology is active.",
                        parameters.conveyance_2d.label()
                    ),
                ));
            }
        }

        ValidationReport::leaf(self.name(), issues)
    }
}
