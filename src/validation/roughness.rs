//! Channel friction validation.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::network::Network;
use crate::model::roughness::{ChannelFriction, FrictionFunction, FrictionSpecification};
use crate::validation::common::join_numbers;
use crate::validation::ModelValidator;
use indexmap::IndexMap;

/// Validator for channel friction definitions.
pub struct RoughnessValidator;

impl ModelValidator for RoughnessValidator {
    fn name(&self) -> &str {
        "Roughness"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let mut issues = Vec::new();

        for friction in &model.roughness {
            if let FrictionSpecification::Spatial { function } = &friction.specification {
                issues.extend(spatial_issues(&model.network, friction, function));
            }
        }
        issues.extend(shared_definition_conflicts(&model.network, &model.roughness));

        ValidationReport::leaf(self.name(), issues)
    }
}

fn spatial_issues(network: &Network, friction: &ChannelFriction, function: &FrictionFunction) -> Vec<ValidationIssue> {
    let subject = FeatureRef::new(FeatureKind::Channel, &friction.channel);
    let label = function.label();
    let chainages = function.chainages();

    if chainages.is_empty() {
        return vec![ValidationIssue::error(subject, format!("No '{}' values defined", label))];
    }

    let mut issues = Vec::new();
    if let FrictionFunction::Constant { .. } = function {
        let mut sorted = chainages.clone();
        sorted.sort_by(f64::total_cmp);
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            issues.push(ValidationIssue::error(
                subject.clone(),
                format!("One or more '{}' values have a duplicate 'Chainage'", label),
            ));
        }
    }

    let Some(channel) = network.branch(&friction.channel) else {
        issues.push(ValidationIssue::error(
            subject,
            format!("Roughness is defined on unknown channel '{}'.", friction.channel),
        ));
        return issues;
    };

    let outside: Vec<f64> = chainages
        .into_iter()
        .filter(|c| *c < 0.0 || *c > channel.length)
        .collect();
    if !outside.is_empty() {
        issues.push(ValidationIssue::error(
            subject,
            format!(
                "One or more '{}' values are invalid regarding their 'Chainage'. The chainages involved are: {}.",
                label,
                join_numbers(&outside)
            ),
        ));
    }

    issues
}

/// Channels sharing a cross-section definition must agree on whether friction
/// comes from the roughness sections.
fn shared_definition_conflicts(network: &Network, roughness: &[ChannelFriction]) -> Vec<ValidationIssue> {
    let mut users: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for channel in network.channels() {
        for definition in channel.cross_sections.iter().filter_map(|c| c.definition.as_deref()) {
            let channels = users.entry(definition).or_default();
            if !channels.contains(&channel.name.as_str()) {
                channels.push(&channel.name);
            }
        }
    }

    let by_sections = |channel: &str| {
        roughness
            .iter()
            .find(|f| f.channel == channel)
            .is_some_and(|f| f.specification.is_by_roughness_sections())
    };

    users
        .into_iter()
        .filter(|(_, channels)| {
            let sections = channels.iter().filter(|&&c| by_sections(c)).count();
            sections > 0 && sections < channels.len()
        })
        .map(|(definition, channels)| {
            ValidationIssue::error(
                FeatureRef::new(FeatureKind::CrossSectionDefinition, definition),
                format!(
                    "This shared cross section definition is used on branches that have a conflicting roughness Specification type. The branches involved are: {}.",
                    channels.join(", ")
                ),
            )
            .with_references(channels.iter().map(|c| FeatureRef::new(FeatureKind::Channel, *c)))
        })
        .collect()
}
