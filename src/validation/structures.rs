//! Placement of branch structures along their branch.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::network::Branch;
use crate::validation::grid::STRUCTURE_TOLERANCE;
use crate::validation::ModelValidator;

/// Validator for structure locations on 1D branches.
pub struct StructureLocationValidator;

impl ModelValidator for StructureLocationValidator {
    fn name(&self) -> &str {
        "Structures"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let issues = ctx
            .model
            .network
            .branches
            .iter()
            .flat_map(branch_issues)
            .collect();
        ValidationReport::leaf(self.name(), issues)
    }
}

fn branch_issues(branch: &Branch) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let branch_ref = FeatureRef::new(FeatureKind::Branch, &branch.name);

    for structure in &branch.structures {
        let subject = FeatureRef::new(FeatureKind::Structure, &structure.name);
        if branch.is_zero_length_sewer_connection() {
            issues.push(
                ValidationIssue::error(
                    subject.clone(),
                    format!(
                        "Structure '{}' is located on sewer connection '{}' which has (almost) zero length.",
                        structure.name, branch.name
                    ),
                )
                .with_reference(branch_ref.clone()),
            );
        }
        if structure.chainage < 0.0 || structure.chainage > branch.length {
            issues.push(
                ValidationIssue::error(
                    subject,
                    format!(
                        "Structure '{}' has chainage {} outside of branch '{}' (length {}).",
                        structure.name, structure.chainage, branch.name, branch.length
                    ),
                )
                .with_reference(branch_ref.clone()),
            );
        }
    }

    let ordered = branch.structures_by_chainage();
    for pair in ordered.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if (second.chainage - first.chainage).abs() < STRUCTURE_TOLERANCE
            && first.composite_name() != second.composite_name()
        {
            issues.push(
                ValidationIssue::error(
                    FeatureRef::new(FeatureKind::Structure, &second.name),
                    format!(
                        "Structures '{}' and '{}' are at the same location on branch '{}' but belong to different composite structures.",
                        first.name, second.name, branch.name
                    ),
                )
                .with_references([
                    FeatureRef::new(FeatureKind::Structure, &first.name),
                    branch_ref.clone(),
                ]),
            );
        }
    }

    issues
}
