//! Computational grid validation.
//!
//! Checks that the 1D discretization covers every branch end to end, that
//! there is room for the kernel between consecutive structures, that no
//! structure sits exactly on a computational point and that segments are not
//! degenerate.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::discretization::{BranchEnd, Discretization};
use crate::model::network::Branch;
use crate::model::HydroModel;
use crate::validation::common::empty_names;
use crate::validation::ModelValidator;
use indexmap::IndexMap;

/// Distance within which a point counts as lying on a branch node.
pub const NODE_TOLERANCE: f64 = 1e-6;

/// Distance within which a structure counts as lying on a point.
pub const STRUCTURE_TOLERANCE: f64 = 1e-7;

/// Validator for the computational grid.
pub struct ComputationalGridValidator;

impl ModelValidator for ComputationalGridValidator {
    fn name(&self) -> &str {
        "Computational grid"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let discretization = &model.discretization;

        if discretization.is_empty() && model.active_grid().is_none() {
            return ValidationReport::leaf(
                self.name(),
                vec![ValidationIssue::error(
                    discretization_ref(discretization),
                    "No computational grid defined.",
                )],
            );
        }

        let mut issues = Vec::new();
        let mut finite_volume = Vec::new();
        let mut segments = Vec::new();

        for branch in &model.network.branches {
            if branch.is_zero_length_sewer_connection() {
                continue;
            }
            issues.extend(branch_end_issues(discretization, branch));
            issues.extend(structure_gap_issues(discretization, branch));
            finite_volume.extend(structure_on_point_issues(discretization, branch));
            segments.extend(segment_issues(discretization, branch, ctx.settings.min_segment_length));
        }

        let mut general = duplicate_location_names(discretization);
        general.extend(empty_names(
            discretization.locations.iter().map(|l| l.name.as_str()),
            "grid point",
            FeatureKind::GridPoint,
        ));
        general.extend(location_issues(discretization, model));

        ValidationReport::with_non_empty_children(
            self.name(),
            issues,
            vec![
                ValidationReport::leaf("General", general),
                ValidationReport::leaf("Finite volume", finite_volume),
                ValidationReport::leaf("Segment issues", segments),
            ],
        )
    }
}

fn discretization_ref(discretization: &Discretization) -> FeatureRef {
    let name = if discretization.name.is_empty() {
        "computational grid"
    } else {
        discretization.name.as_str()
    };
    FeatureRef::new(FeatureKind::Discretization, name)
}

fn branch_ref(branch: &Branch) -> FeatureRef {
    FeatureRef::new(FeatureKind::Branch, &branch.name)
}

/// Both branch ends need a computational point.
fn branch_end_issues(discretization: &Discretization, branch: &Branch) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let ends = [
        (BranchEnd::Begin, &branch.source, "start"),
        (BranchEnd::End, &branch.target, "end"),
    ];
    for (end, node, label) in ends {
        if discretization
            .location_for_branch_node(branch, end, NODE_TOLERANCE)
            .is_none()
        {
            issues.push(
                ValidationIssue::error(
                    FeatureRef::new(FeatureKind::Node, node),
                    format!(
                        "No computational grid cells defined for branch : {}, not at {} of branch; can not start calculation.",
                        branch.name, label
                    ),
                )
                .with_reference(branch_ref(branch)),
            );
        }
    }
    issues
}

/// Every pair of consecutive composite structures needs a point in between.
///
/// Structures of one composite share a location and are never compared.
fn structure_gap_issues(discretization: &Discretization, branch: &Branch) -> Vec<ValidationIssue> {
    let mut composites: IndexMap<&str, f64> = IndexMap::new();
    for structure in branch.structures_by_chainage() {
        composites
            .entry(structure.composite_name())
            .or_insert(structure.chainage);
    }
    if composites.len() < 2 {
        return Vec::new();
    }

    let locations = discretization.locations_for_branch(&branch.name);
    let ordered: Vec<(&str, f64)> = composites.into_iter().collect();

    ordered
        .windows(2)
        .filter(|pair| {
            let (from, to) = (pair[0].1, pair[1].1);
            !locations.iter().any(|l| l.chainage >= from && l.chainage <= to)
        })
        .map(|pair| {
            ValidationIssue::error(
                branch_ref(branch),
                format!(
                    "No grid points defined between structure {} and {}.",
                    pair[0].0, pair[1].0
                ),
            )
            .with_references([
                FeatureRef::new(FeatureKind::CompositeStructure, pair[0].0),
                FeatureRef::new(FeatureKind::CompositeStructure, pair[1].0),
            ])
        })
        .collect()
}

/// A structure must lie strictly between computational points.
fn structure_on_point_issues(discretization: &Discretization, branch: &Branch) -> Vec<ValidationIssue> {
    let locations = discretization.locations_for_branch(&branch.name);
    branch
        .structures
        .iter()
        .filter(|s| {
            locations
                .iter()
                .any(|l| (l.chainage - s.chainage).abs() < STRUCTURE_TOLERANCE)
        })
        .map(|s| {
            ValidationIssue::error(
                FeatureRef::new(FeatureKind::Structure, &s.name),
                format!(
                    "Original discretization is invalid; structure {} is on a grid point",
                    s.name
                ),
            )
            .with_reference(branch_ref(branch))
        })
        .collect()
}

fn segment_issues(discretization: &Discretization, branch: &Branch, min_length: f64) -> Vec<ValidationIssue> {
    let segments = discretization.segments_for_branch(&branch.name);
    if segments.is_empty() {
        return vec![ValidationIssue::error(
            branch_ref(branch),
            format!("Branch '{}' has no computational segments.", branch.name),
        )];
    }

    segments
        .iter()
        .filter(|segment| segment.length() < min_length)
        .map(|segment| {
            ValidationIssue::warning(
                branch_ref(branch),
                format!(
                    "Segment between chainage {} and {} on branch '{}' is shorter than the minimum segment length of {}.",
                    segment.start_chainage, segment.end_chainage, branch.name, min_length
                ),
            )
        })
        .collect()
}

fn duplicate_location_names(discretization: &Discretization) -> Vec<ValidationIssue> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for location in discretization.locations.iter().filter(|l| !l.name.is_empty()) {
        *counts.entry(location.name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| {
            ValidationIssue::error(
                FeatureRef::new(FeatureKind::GridPoint, name),
                "Several grid points with the same id exist",
            )
        })
        .collect()
}

/// Points at the same position and points on unknown branches.
fn location_issues(discretization: &Discretization, model: &HydroModel) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut branches: IndexMap<&str, ()> = IndexMap::new();
    for location in &discretization.locations {
        if model.network.branch(&location.branch).is_none() {
            issues.push(ValidationIssue::error(
                FeatureRef::new(FeatureKind::GridPoint, &location.name),
                format!(
                    "Grid point '{}' refers to unknown branch '{}'.",
                    location.name, location.branch
                ),
            ));
        }
        branches.insert(location.branch.as_str(), ());
    }

    for branch in branches.keys() {
        let locations = discretization.locations_for_branch(branch);
        for pair in locations.windows(2) {
            if (pair[1].chainage - pair[0].chainage).abs() < STRUCTURE_TOLERANCE {
                issues.push(
                    ValidationIssue::error(
                        FeatureRef::new(FeatureKind::GridPoint, &pair[1].name),
                        format!(
                            "Grid points '{}' and '{}' are at the same location on branch '{}'.",
                            pair[0].name, pair[1].name, branch
                        ),
                    )
                    .with_reference(FeatureRef::new(FeatureKind::GridPoint, &pair[0].name)),
                );
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::ValidationSeverity;
    use crate::core::settings::ValidationSettings;
    use crate::model::discretization::{Grid2D, NetworkLocation};
    use crate::model::network::{BranchKind, BranchStructure, Node};
    use crate::validation::testing::{messages, model, run, run_with};

    fn model_with_branch(length: f64, chainages: &[f64]) -> HydroModel {
        let mut model = model();
        model.network.nodes = vec![Node::new("n1"), Node::new("n2")];
        model.network.branches.push(Branch::new("branch1", "n1", "n2", length));
        model.discretization.locations = chainages
            .iter()
            .enumerate()
            .map(|(i, c)| NetworkLocation::new(format!("p{}", i + 1), "branch1", *c))
            .collect();
        model
    }

    #[test]
    fn test_no_grid_defined() {
        let report = run(&ComputationalGridValidator, &model());
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.issues()[0].message(), "No computational grid defined.");
        assert_eq!(report.issues()[0].subject().kind, FeatureKind::Discretization);
    }

    #[test]
    fn test_empty_2d_grid_counts_as_absent() {
        let mut model = model();
        model.grid = Some(Grid2D::default());
        let report = run(&ComputationalGridValidator, &model);
        assert_eq!(messages(&report), vec!["No computational grid defined."]);
    }

    #[test]
    fn test_valid_branch() {
        let model = model_with_branch(100.0, &[0.0, 50.0, 100.0]);
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn test_missing_start_point_references_source_node() {
        let model = model_with_branch(100.0, &[50.0, 100.0]);
        let report = run(&ComputationalGridValidator, &model);
        assert_eq!(report.issues().len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.subject(), &FeatureRef::new(FeatureKind::Node, "n1"));
        assert_eq!(
            issue.message(),
            "No computational grid cells defined for branch : branch1, not at start of branch; can not start calculation."
        );
    }

    #[test]
    fn test_missing_both_ends() {
        let model = model_with_branch(100.0, &[20.0, 50.0]);
        let report = run(&ComputationalGridValidator, &model);
        let subjects: Vec<_> = report.issues().iter().map(|i| i.subject().name.clone()).collect();
        assert_eq!(subjects, vec!["n1", "n2"]);
        assert!(report.issues()[1].message().contains("not at end of branch"));
    }

    #[test]
    fn test_zero_length_sewer_connection_skipped() {
        let mut model = model_with_branch(100.0, &[0.0, 100.0]);
        model
            .network
            .branches
            .push(Branch::new("sc1", "n2", "n2", 0.0).with_kind(BranchKind::SewerConnection));
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn test_no_points_between_structures() {
        let mut model = model_with_branch(100.0, &[0.0, 10.0, 90.0, 100.0]);
        model.network.branches[0] = model.network.branches[0]
            .clone()
            .with_structure(BranchStructure::new("weir1", 40.0))
            .with_structure(BranchStructure::new("weir2", 60.0));
        let report = run(&ComputationalGridValidator, &model);
        assert_eq!(
            messages(&report),
            vec!["No grid points defined between structure weir1 and weir2."]
        );
    }

    #[test]
    fn test_structures_in_same_composite_not_compared() {
        let mut model = model_with_branch(100.0, &[0.0, 10.0, 90.0, 100.0]);
        model.network.branches[0] = model.network.branches[0]
            .clone()
            .with_structure(BranchStructure::new("weir1", 40.0).in_composite("cs1"))
            .with_structure(BranchStructure::new("pump1", 40.0).in_composite("cs1"));
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn test_point_between_structures_ok() {
        let mut model = model_with_branch(100.0, &[0.0, 50.0, 100.0]);
        model.network.branches[0] = model.network.branches[0]
            .clone()
            .with_structure(BranchStructure::new("weir1", 40.0))
            .with_structure(BranchStructure::new("weir2", 60.0));
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn test_structure_on_grid_point() {
        let mut model = model_with_branch(100.0, &[0.0, 50.0, 100.0]);
        model.network.branches[0] = model.network.branches[0]
            .clone()
            .with_structure(BranchStructure::new("weir1", 50.0));
        let report = run(&ComputationalGridValidator, &model);
        let finite_volume = report.sub_report("Finite volume").unwrap();
        assert_eq!(finite_volume.issues().len(), 1);
        assert_eq!(
            finite_volume.issues()[0].message(),
            "Original discretization is invalid; structure weir1 is on a grid point"
        );
        assert_eq!(finite_volume.issues()[0].subject().kind, FeatureKind::Structure);
    }

    #[test]
    fn test_short_segment_is_warning_in_sub_report() {
        let model = model_with_branch(2.2, &[0.0, 0.2, 2.2]);
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.issues().is_empty());
        assert_eq!(report.severity(), Some(ValidationSeverity::Warning));
        assert_eq!(report.sub_report("Segment issues").unwrap().issues().len(), 1);
    }

    #[test]
    fn test_segment_equal_to_minimum_not_flagged() {
        let model = model_with_branch(3.0, &[0.0, 1.0, 3.0]);
        assert!(run(&ComputationalGridValidator, &model).is_empty());

        let settings = ValidationSettings::default().with_min_segment_length(2.0);
        let report = run_with(&ComputationalGridValidator, &model, &settings);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_branch_without_segments() {
        let mut model = model_with_branch(100.0, &[0.0, 100.0]);
        model.network.branches.push(Branch::new("branch2", "n2", "n3", 10.0));
        model.discretization.locations.push(NetworkLocation::new("q1", "branch2", 0.0));
        let report = run(&ComputationalGridValidator, &model);
        let segments = report.sub_report("Segment issues").unwrap();
        assert_eq!(segments.error_count(), 1);
        assert_eq!(segments.issues()[0].message(), "Branch 'branch2' has no computational segments.");
    }

    #[test]
    fn test_duplicate_ids_and_positions() {
        let mut model = model_with_branch(100.0, &[0.0, 50.0, 100.0]);
        model.discretization.locations[2].name = "p1".to_string();
        model.discretization.locations.push(NetworkLocation::new("p4", "branch1", 50.0));
        let report = run(&ComputationalGridValidator, &model);
        let general = report.sub_report("General").unwrap();
        let messages: Vec<_> = general.issues().iter().map(|i| i.message()).collect();
        assert!(messages.contains(&"Several grid points with the same id exist"));
        assert!(messages
            .iter()
            .any(|m| m.contains("are at the same location on branch 'branch1'")));
    }

    #[test]
    fn test_empty_children_dropped() {
        let model = model_with_branch(100.0, &[0.0, 50.0]);
        let report = run(&ComputationalGridValidator, &model);
        assert!(report.sub_reports().is_empty());
    }
}
