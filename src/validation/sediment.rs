//! Sediment and morphology validation.
//!
//! Only part of the pipeline when morphology is active.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::sediment::{SedimentFraction, SpatialOperationKind};
use crate::model::HydroModel;
use crate::validation::ModelValidator;
use regex::Regex;
use std::sync::LazyLock;

static FRACTION_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]*$").unwrap());

/// Suffix of concentration properties, which are exported regardless.
const SEDIMENT_CONCENTRATION_SUFFIX: &str = "SedConc";

/// Validator for sediment fractions.
pub struct SedimentValidator;

impl ModelValidator for SedimentValidator {
    fn name(&self) -> &str {
        "Sediment"
    }

    fn applies_to(&self, model: &HydroModel) -> bool {
        model.morphology_active()
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let fractions = &ctx.model.sediment.fractions;
        let mut issues = Vec::new();

        if fractions.is_empty() {
            issues.push(ValidationIssue::error(
                sediment_ref(),
                "At least one sediment fraction is required.",
            ));
        } else {
            for fraction in fractions {
                issues.extend(fraction_name(fraction));
            }
            if !fractions.iter().any(|f| f.initial_thickness > 0.0) {
                issues.push(ValidationIssue::error(
                    sediment_ref(),
                    "At least one sediment fraction should have a positive initial sediment thickness.",
                ));
            }
            for fraction in fractions {
                issues.extend(unexportable_properties(fraction));
            }
        }

        issues.push(ValidationIssue::warning(
            sediment_ref(),
            "Morphology is a beta functionality; results may change in future releases.",
        ));

        ValidationReport::leaf(self.name(), issues)
    }
}

fn sediment_ref() -> FeatureRef {
    FeatureRef::new(FeatureKind::SedimentFraction, "sediment")
}

fn fraction_name(fraction: &SedimentFraction) -> Option<ValidationIssue> {
    if fraction.name.is_empty() {
        return Some(ValidationIssue::error(
            sediment_ref(),
            "A sediment fraction without a name exists.",
        ));
    }
    (!FRACTION_NAME_RE.is_match(&fraction.name)).then(|| {
        ValidationIssue::error(
            FeatureRef::new(FeatureKind::SedimentFraction, &fraction.name),
            format!(
                "Sediment fraction name '{}' may only contain letters, digits, '_' and '-'.",
                fraction.name
            ),
        )
    })
}

/// Properties still backed by raw point values cannot be written to the grid.
fn unexportable_properties(fraction: &SedimentFraction) -> Vec<ValidationIssue> {
    fraction
        .properties
        .iter()
        .filter(|p| p.spatially_varying)
        .filter(|p| !p.name.ends_with(SEDIMENT_CONCENTRATION_SUFFIX))
        .filter(|p| p.operation == SpatialOperationKind::ValueOperation)
        .map(|p| {
            ValidationIssue::warning(
                FeatureRef::new(FeatureKind::SedimentFraction, &fraction.name),
                format!(
                    "Spatially varying property '{}' of sediment fraction '{}' is not interpolated to the grid and cannot be exported; add an interpolation operation.",
                    p.name, fraction.name
                ),
            )
        })
        .collect()
}
