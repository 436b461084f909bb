//! Network validation: naming, topology and per-feature sanity checks.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::network::{BranchStructureKind, Network, NO_ORDER};
use crate::validation::common::{duplicate_names, empty_names};
use crate::validation::ModelValidator;
use indexmap::{IndexMap, IndexSet};

/// Validator for the 1D network.
pub struct NetworkValidator;

impl ModelValidator for NetworkValidator {
    fn name(&self) -> &str {
        "Network"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let network = &ctx.model.network;
        let lateral_names = ctx.model.laterals.iter().map(|l| l.name.as_str());

        ValidationReport::new(
            self.name(),
            Vec::new(),
            vec![
                general(network, lateral_names),
                coordinate_system(network),
                branches(network),
                cross_sections(network),
                culverts(network),
                retentions(network),
                compartments(network),
                routes(network),
            ],
        )
    }
}

fn general<'a>(network: &'a Network, lateral_names: impl Iterator<Item = &'a str> + Clone) -> ValidationReport {
    let branch_names = || network.branches.iter().map(|b| b.name.as_str());
    let node_names = || network.nodes.iter().map(|n| n.name.as_str());
    let structure_names = || network.structures().map(|(_, s)| s.name.as_str());
    // one entry per composite: members on the same branch share the name
    let composite_names = || {
        network.branches.iter().flat_map(|b| {
            b.structures
                .iter()
                .filter_map(|s| s.composite.as_deref())
                .collect::<IndexSet<_>>()
        })
    };
    let cross_section_names = || {
        network
            .branches
            .iter()
            .flat_map(|b| b.cross_sections.iter().map(|c| c.name.as_str()))
    };
    let definition_names = || network.shared_definitions.iter().map(String::as_str);
    let retention_names = || network.retentions.iter().map(|r| r.name.as_str());
    let compartment_names = || {
        network
            .nodes
            .iter()
            .flat_map(|n| n.compartments.iter().map(|c| c.name.as_str()))
    };

    let mut issues = Vec::new();
    issues.extend(duplicate_names(branch_names(), "branches", FeatureKind::Branch));
    issues.extend(duplicate_names(node_names(), "nodes", FeatureKind::Node));
    issues.extend(duplicate_names(structure_names(), "structures", FeatureKind::Structure));
    issues.extend(duplicate_names(cross_section_names(), "cross sections", FeatureKind::CrossSection));
    issues.extend(duplicate_names(
        definition_names(),
        "cross section definitions",
        FeatureKind::CrossSectionDefinition,
    ));
    issues.extend(duplicate_names(lateral_names.clone(), "lateral sources", FeatureKind::Lateral));
    issues.extend(duplicate_names(retention_names(), "retentions", FeatureKind::Retention));
    issues.extend(duplicate_names(compartment_names(), "compartments", FeatureKind::Compartment));
    issues.extend(duplicate_names(
        composite_names(),
        "composite branch structures",
        FeatureKind::CompositeStructure,
    ));

    issues.extend(empty_names(branch_names(), "branch", FeatureKind::Branch));
    issues.extend(empty_names(node_names(), "node", FeatureKind::Node));
    issues.extend(empty_names(structure_names(), "structure", FeatureKind::Structure));
    issues.extend(empty_names(cross_section_names(), "cross section", FeatureKind::CrossSection));
    issues.extend(empty_names(
        definition_names(),
        "cross section definition",
        FeatureKind::CrossSectionDefinition,
    ));
    issues.extend(empty_names(lateral_names, "lateral source", FeatureKind::Lateral));
    issues.extend(empty_names(retention_names(), "retention", FeatureKind::Retention));
    issues.extend(empty_names(compartment_names(), "compartment", FeatureKind::Compartment));
    issues.extend(empty_names(
        composite_names(),
        "composite branch structure",
        FeatureKind::CompositeStructure,
    ));

    ValidationReport::leaf("General", issues)
}

fn coordinate_system(network: &Network) -> ValidationReport {
    let issues = match &network.coordinate_system {
        None => vec![ValidationIssue::warning(
            FeatureRef::new(FeatureKind::CoordinateSystem, "network"),
            "No coordinate system selected for the network.",
        )],
        Some(cs) if cs.geographic => vec![ValidationIssue::error(
            FeatureRef::new(FeatureKind::CoordinateSystem, &cs.name),
            format!(
                "Cannot perform a calculation in geographic coordinate system '{}'; select a projected coordinate system.",
                cs.name
            ),
        )],
        Some(_) => Vec::new(),
    };
    ValidationReport::leaf("Coordinate system", issues)
}

fn branches(network: &Network) -> ValidationReport {
    let mut issues = Vec::new();

    for branch in network.channels() {
        let subject = FeatureRef::new(FeatureKind::Branch, &branch.name);
        if branch.source == branch.target {
            issues.push(ValidationIssue::error(
                subject.clone(),
                format!(
                    "Target and source node of branch '{}' have same id '{}'.",
                    branch.name, branch.source
                ),
            ));
        }
        if branch.order_number < 0 && branch.order_number != NO_ORDER {
            issues.push(ValidationIssue::error(
                subject,
                format!(
                    "Branch '{}' has an invalid order number {}; use -1 or a number of 0 or more.",
                    branch.name, branch.order_number
                ),
            ));
        }
    }

    for node in &network.nodes {
        let mut by_order: IndexMap<i32, Vec<&str>> = IndexMap::new();
        for branch in network.branches_at(&node.name) {
            by_order.entry(branch.order_number).or_default().push(&branch.name);
        }
        for (order, names) in by_order {
            if order > 0 && names.len() > 2 {
                issues.push(
                    ValidationIssue::error(
                        FeatureRef::new(FeatureKind::Node, &node.name),
                        format!(
                            "More than two branches with order number {} are connected to node '{}'.",
                            order, node.name
                        ),
                    )
                    .with_references(names.into_iter().map(|n| FeatureRef::new(FeatureKind::Branch, n))),
                );
            }
        }
    }

    ValidationReport::leaf("Branches", issues)
}

fn cross_sections(network: &Network) -> ValidationReport {
    let mut issues = Vec::new();
    for channel in network.channels() {
        if channel.cross_sections.is_empty() {
            issues.push(ValidationIssue::error(
                FeatureRef::new(FeatureKind::Branch, &channel.name),
                format!("No cross sections on channel '{}'.", channel.name),
            ));
        }
        for cross_section in &channel.cross_sections {
            if let Some(definition) = &cross_section.definition {
                if !network.shared_definitions.iter().any(|d| d == definition) {
                    issues.push(
                        ValidationIssue::error(
                            FeatureRef::new(FeatureKind::CrossSection, &cross_section.name),
                            format!(
                                "Cross section '{}' uses unknown shared definition '{}'.",
                                cross_section.name, definition
                            ),
                        )
                        .with_reference(FeatureRef::new(FeatureKind::Branch, &channel.name)),
                    );
                }
            }
        }
    }
    ValidationReport::leaf("Cross sections", issues)
}

fn culverts(network: &Network) -> ValidationReport {
    let issues = network
        .structures()
        .filter_map(|(_, s)| match &s.kind {
            BranchStructureKind::Culvert(culvert) if culvert.gated && culvert.gate_opening_loss_table.is_empty() => {
                Some(ValidationIssue::error(
                    FeatureRef::new(FeatureKind::Structure, &s.name),
                    format!("Gated culvert '{}' has no gate opening loss table.", s.name),
                ))
            }
            _ => None,
        })
        .collect();
    ValidationReport::leaf("Culverts", issues)
}

fn retentions(network: &Network) -> ValidationReport {
    let mut issues = Vec::new();
    for retention in &network.retentions {
        let subject = FeatureRef::new(FeatureKind::Retention, &retention.name);
        if !retention.use_table {
            if retention.storage_area.abs() < f64::EPSILON {
                issues.push(ValidationIssue::error(
                    subject,
                    format!("Storage area of retention '{}' should be greater than zero.", retention.name),
                ));
            }
            continue;
        }
        if retention.storage_table.is_empty() {
            issues.push(ValidationIssue::error(
                subject,
                format!("Retention '{}' uses a storage table, but the table is empty.", retention.name),
            ));
            continue;
        }
        for (level, storage) in &retention.storage_table {
            if storage.abs() < f64::EPSILON {
                issues.push(ValidationIssue::error(
                    subject.clone(),
                    format!(
                        "Retention '{}' uses a storage table, but the storage at level {} is {}.",
                        retention.name, level, storage
                    ),
                ));
            }
        }
    }
    ValidationReport::leaf("Retentions", issues)
}

fn compartments(network: &Network) -> ValidationReport {
    let mut issues = Vec::new();
    for node in &network.nodes {
        for compartment in &node.compartments {
            let subject = FeatureRef::new(FeatureKind::Compartment, &compartment.name);
            let manhole = FeatureRef::new(FeatureKind::Node, &node.name);
            if compartment.width <= 0.0 {
                issues.push(
                    ValidationIssue::error(
                        subject.clone(),
                        format!("Compartment '{}': width or diameter must be larger than 0.", compartment.name),
                    )
                    .with_reference(manhole.clone()),
                );
            }
            if compartment.length <= 0.0 {
                issues.push(
                    ValidationIssue::error(
                        subject.clone(),
                        format!("Compartment '{}': length must be larger than 0.", compartment.name),
                    )
                    .with_reference(manhole.clone()),
                );
            }
            if compartment.floodable_area <= 0.0 {
                issues.push(
                    ValidationIssue::warning(
                        subject,
                        format!("Compartment '{}': street storage area is 0.", compartment.name),
                    )
                    .with_reference(manhole),
                );
            }
        }
    }
    ValidationReport::leaf("Compartments", issues)
}

fn routes(network: &Network) -> ValidationReport {
    ValidationReport::leaf(
        "Routes",
        duplicate_names(
            network.routes.iter().map(|r| r.name.as_str()),
            "routes",
            FeatureKind::Route,
        ),
    )
}
