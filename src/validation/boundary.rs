//! Boundary condition validation.
//!
//! Every boundary carries a set of conditions, one per prescribed quantity.
//! The set as a whole must form a combination the kernel understands, and
//! each condition must hold data that covers the run.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::boundary::{
    BoundaryConditionSet, BoundaryData, FlowBoundaryCondition, FlowQuantity, VerticalProfileKind,
};
use crate::model::time::TimeWindow;
use crate::validation::ModelValidator;
use chrono::TimeDelta;
use indexmap::IndexMap;

/// Largest allowed offset of a condition's time zone from UTC, in hours.
pub const MAX_TIME_ZONE_HOURS: i64 = 12;

/// Hydrodynamic combinations accepted on a single boundary.
///
/// Each may additionally carry exactly one morphology condition.
const BASE_COMBINATIONS: [&[FlowQuantity]; 12] = [
    &[FlowQuantity::WaterLevel],
    &[FlowQuantity::WaterLevel, FlowQuantity::NormalVelocity],
    &[FlowQuantity::WaterLevel, FlowQuantity::TangentVelocity],
    &[
        FlowQuantity::WaterLevel,
        FlowQuantity::NormalVelocity,
        FlowQuantity::TangentVelocity,
    ],
    &[FlowQuantity::WaterLevel, FlowQuantity::VelocityVector],
    &[FlowQuantity::Velocity],
    &[FlowQuantity::Riemann],
    &[FlowQuantity::Riemann, FlowQuantity::TangentVelocity],
    &[FlowQuantity::RiemannVelocity],
    &[FlowQuantity::Neumann],
    &[FlowQuantity::Discharge],
    &[FlowQuantity::Outflow],
];

/// Astronomical constituents known to the kernel.
const KNOWN_ASTRO_COMPONENTS: &[&str] = &[
    "A0", "SA", "SSA", "MSM", "MM", "MSF", "MF", "ALP1", "2Q1", "SIG1", "Q1", "RHO1", "O1", "TAU1",
    "BET1", "NO1", "CHI1", "PI1", "P1", "S1", "K1", "PSI1", "PHI1", "THE1", "J1", "SO1", "OO1",
    "UPS1", "OQ2", "EPS2", "2N2", "MU2", "N2", "NU2", "GAM2", "H1", "M2", "H2", "MKS2", "LDA2",
    "LA2", "L2", "T2", "S2", "R2", "K2", "MSN2", "ETA2", "MO3", "M3", "SO3", "MK3", "SK3", "MN4",
    "M4", "SN4", "MS4", "MK4", "S4", "SK4", "2SM6", "2MN6", "M6", "2MS6", "2MK6", "MSK6", "3MK7",
    "M8",
];

/// Validator for boundary condition sets.
pub struct BoundaryConditionValidator;

impl ModelValidator for BoundaryConditionValidator {
    fn name(&self) -> &str {
        "Boundary conditions"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let mut issues = duplicate_boundaries(&model.boundary_conditions);

        let frame = &model.time_frame;
        for set in &model.boundary_conditions {
            if set.conditions.is_empty() {
                issues.push(ValidationIssue::error(
                    boundary_ref(set),
                    format!("Boundary '{}' does not contain a boundary condition", set.feature.name),
                ));
                continue;
            }

            issues.extend(support_point_names(set));
            issues.extend(quantity_combination(set));
            issues.extend(morphology_without_hydro(set));
            issues.extend(sediment_concentration_without_hydro(set));

            for condition in &set.conditions {
                let window = frame.run_window_in(condition.time_zone);
                issues.extend(condition_issues(set, condition, window.as_ref()));
            }
        }

        ValidationReport::leaf(self.name(), issues)
    }
}

fn boundary_ref(set: &BoundaryConditionSet) -> FeatureRef {
    FeatureRef::new(FeatureKind::Boundary, &set.feature.name)
}

fn condition_ref(condition: &FlowBoundaryCondition) -> FeatureRef {
    FeatureRef::new(FeatureKind::BoundaryCondition, condition.description())
}

fn duplicate_boundaries(sets: &[BoundaryConditionSet]) -> Vec<ValidationIssue> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for set in sets {
        *counts.entry(set.feature.name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| {
            ValidationIssue::warning(
                FeatureRef::new(FeatureKind::Boundary, name),
                format!("Several boundaries with the same name '{}' exist.", name),
            )
        })
        .collect()
}

/// The kernel only understands generated support point names.
fn support_point_names(set: &BoundaryConditionSet) -> Vec<ValidationIssue> {
    let feature = &set.feature;
    feature
        .support_points
        .iter()
        .enumerate()
        .filter(|(index, name)| !name.is_empty() && **name != feature.default_point_name(*index))
        .map(|(index, name)| {
            ValidationIssue::error(
                boundary_ref(set),
                format!(
                    "Custom support point name {} is not yet supported by the computational core, please change it to {}",
                    name,
                    feature.default_point_name(index)
                ),
            )
        })
        .collect()
}

/// Whether the constrained quantities of one boundary form a valid combination.
///
/// Always-allowed quantities are ignored. An empty combination is accepted.
pub fn is_valid_combination(quantities: &[FlowQuantity]) -> bool {
    let constrained: Vec<FlowQuantity> = quantities
        .iter()
        .copied()
        .filter(|q| !q.is_always_allowed())
        .collect();
    if constrained.is_empty() {
        return true;
    }

    let morphology = constrained.iter().filter(|q| q.is_morphology()).count();
    if morphology > 1 {
        return false;
    }

    let mut hydro: Vec<FlowQuantity> = constrained.into_iter().filter(|q| q.is_hydro()).collect();
    if hydro.is_empty() {
        return morphology == 1;
    }
    hydro.sort();

    BASE_COMBINATIONS.iter().any(|combination| {
        let mut expected = combination.to_vec();
        expected.sort();
        expected == hydro
    })
}

fn quantity_combination(set: &BoundaryConditionSet) -> Option<ValidationIssue> {
    let quantities: Vec<FlowQuantity> = set.conditions.iter().map(|c| c.quantity).collect();
    if is_valid_combination(&quantities) {
        return None;
    }
    let described = set
        .conditions
        .iter()
        .filter(|c| !c.quantity.is_always_allowed())
        .map(|c| c.description())
        .collect::<Vec<_>>()
        .join(", ");
    Some(ValidationIssue::error(
        boundary_ref(set),
        format!(
            "Boundary '{}' has an invalid combination of boundary conditions: {}.",
            set.feature.name, described
        ),
    ))
}

fn morphology_without_hydro(set: &BoundaryConditionSet) -> Option<ValidationIssue> {
    let has_morphology = set.conditions.iter().any(|c| c.quantity.is_morphology());
    let has_hydro = set.conditions.iter().any(|c| c.quantity.is_hydro());
    (has_morphology && !has_hydro).then(|| {
        ValidationIssue::error(
            boundary_ref(set),
            "Morphology boundary condition must have a Hydro boundary condition.",
        )
    })
}

/// Sediment concentration conditions paired with a hydro condition.
///
/// Disabled; reports nothing.
fn sediment_concentration_without_hydro(_set: &BoundaryConditionSet) -> Vec<ValidationIssue> {
    Vec::new()
}

fn condition_issues(
    set: &BoundaryConditionSet,
    condition: &FlowBoundaryCondition,
    window: Option<&TimeWindow>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let description = condition.description();

    if condition.time_zone.abs() > TimeDelta::hours(MAX_TIME_ZONE_HOURS) {
        issues.push(ValidationIssue::error(
            condition_ref(condition),
            format!(
                "Time zone of boundary condition '{}' falls outside of allowed range -12:00 and +12:00",
                description
            ),
        ));
    }

    issues.extend(vertical_profile(set, condition));

    let points: Vec<_> = if condition.quantity.is_morphology() {
        let with_data: Vec<_> = condition.point_data.iter().filter(|p| p.data.has_values()).collect();
        if with_data.len() > 1 {
            issues.push(
                ValidationIssue::error(
                    condition_ref(condition),
                    "A morphology boundary condition cannot have more than one point with generated data.",
                )
                .with_reference(boundary_ref(set)),
            );
            return issues;
        }
        with_data
    } else {
        if condition.point_data.is_empty() {
            issues.push(
                ValidationIssue::error(
                    condition_ref(condition),
                    format!(
                        "No data defined for boundary condition '{}' at boundary '{}'",
                        description, set.feature.name
                    ),
                )
                .with_reference(boundary_ref(set)),
            );
            return issues;
        }
        condition.point_data.iter().collect()
    };

    for point in points {
        let point_name = set.feature.point_name(point.index);
        let point_ref = FeatureRef::new(FeatureKind::Boundary, &point_name);
        match &point.data {
            BoundaryData::TimeSeries(series) => {
                if series.is_empty() {
                    issues.push(ValidationIssue::error(
                        point_ref,
                        format!("Time series contains no values for {} at point {}.", description, point_name),
                    ));
                    continue;
                }
                if window.is_some_and(|w| !w.is_covered_by(series)) {
                    issues.push(ValidationIssue::error(
                        point_ref.clone(),
                        format!(
                            "Time series does not span model run interval for {} at point {}.",
                            description, point_name
                        ),
                    ));
                }
                if condition.quantity.is_strictly_positive() && series.has_negative_values() {
                    issues.push(ValidationIssue::error(
                        point_ref,
                        format!(
                            "Time series contains forbidden negative values for {} at point {}.",
                            description, point_name
                        ),
                    ));
                }
            }
            BoundaryData::Astronomical { components } => {
                for component in components {
                    let known = KNOWN_ASTRO_COMPONENTS
                        .iter()
                        .any(|k| k.eq_ignore_ascii_case(&component.name));
                    if !known {
                        issues.push(ValidationIssue::warning(
                            point_ref.clone(),
                            format!(
                                "Astronomical component '{}' for {} at point {} is not a known component.",
                                component.name, description, point_name
                            ),
                        ));
                    }
                }
            }
            BoundaryData::Harmonic { .. } | BoundaryData::QhTable { .. } | BoundaryData::Constant { .. } => {}
        }
    }

    issues
}

fn vertical_profile(set: &BoundaryConditionSet, condition: &FlowBoundaryCondition) -> Option<ValidationIssue> {
    let profile = condition.vertical_profile.as_ref()?;
    if profile.kind != VerticalProfileKind::PercentageFromBed {
        return None;
    }
    let in_range = profile.heights.iter().all(|h| (0.0..=100.0).contains(h));
    let increasing = profile.heights.windows(2).all(|pair| pair[0] < pair[1]);
    if in_range && increasing {
        return None;
    }
    Some(
        ValidationIssue::error(
            condition_ref(condition),
            format!(
                "Vertical profile of boundary condition '{}' at boundary '{}' must have strictly increasing percentages within [0, 100].",
                condition.description(),
                set.feature.name
            ),
        )
        .with_reference(boundary_ref(set)),
    )
}
