//! Rainfall-runoff link validation.
//!
//! Realtime laterals receive their discharge online from rainfall-runoff, so
//! they must be fed by catchments or treatment plants and nothing else.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::links::{HydroLink, LinkEndpointKind};
use crate::validation::ModelValidator;
use indexmap::IndexMap;

/// Validator for hydro links.
pub struct HydroLinksValidator;

impl ModelValidator for HydroLinksValidator {
    fn name(&self) -> &str {
        "Hydro links"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let mut by_target: IndexMap<&str, Vec<&HydroLink>> = IndexMap::new();
        for link in &model.links {
            by_target.entry(link.target.name.as_str()).or_default().push(link);
        }

        let mut issues = Vec::new();
        for lateral in model.laterals.iter().filter(|l| l.realtime) {
            let incoming = by_target.get(lateral.name.as_str()).map(Vec::as_slice).unwrap_or_default();
            let fed_by_runoff = !incoming.is_empty() && incoming.iter().all(|l| l.source.kind.is_realtime_source());
            if !fed_by_runoff {
                issues.push(
                    ValidationIssue::error(
                        FeatureRef::new(FeatureKind::Lateral, &lateral.name),
                        format!(
                            "Lateral '{}' is set to realtime but is not linked to a catchment or waste water treatment plant only.",
                            lateral.name
                        ),
                    )
                    .with_references(incoming.iter().map(|l| FeatureRef::new(FeatureKind::Link, &l.name))),
                );
            }
        }

        for link in &model.links {
            if link.source.kind != LinkEndpointKind::Catchment || link.target.kind != LinkEndpointKind::Lateral {
                continue;
            }
            let realtime = model
                .laterals
                .iter()
                .find(|l| l.name == link.target.name)
                .is_some_and(|l| l.realtime);
            if !realtime {
                issues.push(
                    ValidationIssue::error(
                        FeatureRef::new(FeatureKind::Link, &link.name),
                        format!(
                            "Catchment '{}' is linked to lateral '{}', which is not set to realtime.",
                            link.source.name, link.target.name
                        ),
                    )
                    .with_reference(FeatureRef::new(FeatureKind::Lateral, &link.target.name)),
                );
            }
        }

        ValidationReport::leaf(self.name(), issues)
    }
}
