//! Embankment geometry validation.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::validation::ModelValidator;

/// Validator for embankment geometries.
pub struct EmbankmentValidator;

impl ModelValidator for EmbankmentValidator {
    fn name(&self) -> &str {
        "Embankments"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let embankments = &ctx.model.area.embankments;
        let mut issues = Vec::new();

        for channel in ctx.model.network.channels() {
            for embankment in embankments {
                if channel.geometry.intersects(&embankment.geometry) {
                    issues.push(
                        ValidationIssue::error(
                            FeatureRef::new(FeatureKind::Embankment, &embankment.name),
                            format!(
                                "Channel '{}' intersects embankment '{}'.",
                                channel.name, embankment.name
                            ),
                        )
                        .with_reference(FeatureRef::new(FeatureKind::Channel, &channel.name)),
                    );
                }
            }
        }

        for (i, first) in embankments.iter().enumerate() {
            for second in &embankments[i + 1..] {
                if first.geometry.intersects(&second.geometry) {
                    issues.push(
                        ValidationIssue::error(
                            FeatureRef::new(FeatureKind::Embankment, &first.name),
                            format!(
                                "Embankments '{}' and '{}' intersect.",
                                first.name, second.name
                            ),
                        )
                        .with_reference(FeatureRef::new(FeatureKind::Embankment, &second.name)),
                    );
                }
            }
        }

        for embankment in embankments {
            if embankment.geometry.self_intersects() {
                issues.push(ValidationIssue::error(
                    FeatureRef::new(FeatureKind::Embankment, &embankment.name),
                    format!("Embankment '{}' intersects itself.", embankment.name),
                ));
            }
        }

        ValidationReport::leaf(self.name(), issues)
    }
}
