//! 1D network: nodes, branches and the features placed on branches.

use crate::model::geometry::Polyline;
use serde::{Deserialize, Serialize};

/// Branches shorter than this are treated as zero-length.
pub const ZERO_LENGTH_TOLERANCE: f64 = 1e-6;

/// Order number meaning "not part of an ordered chain".
pub const NO_ORDER: i32 = -1;

/// Projection of the network coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateSystem {
    pub name: String,
    pub geographic: bool,
}

/// Street storage compartment of a manhole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compartment {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub floodable_area: f64,
}

/// A network node. Manholes carry compartments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub name: String,
    pub compartments: Vec<Compartment>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compartments: Vec::new(),
        }
    }

    pub fn is_manhole(&self) -> bool {
        !self.compartments.is_empty()
    }
}

/// Kind of 1D branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    #[default]
    Channel,
    Pipe,
    SewerConnection,
}

/// Culvert specific data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Culvert {
    pub gated: bool,
    /// Gate opening against loss coefficient.
    pub gate_opening_loss_table: Vec<(f64, f64)>,
}

/// Kind of structure placed on a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BranchStructureKind {
    #[default]
    Weir,
    Pump,
    Gate,
    Orifice,
    Bridge,
    Culvert(Culvert),
    LeveeBreach,
}

/// A structure located on a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchStructure {
    pub name: String,
    pub chainage: f64,
    /// Name of the composite structure grouping co-located structures.
    pub composite: Option<String>,
    pub kind: BranchStructureKind,
}

impl BranchStructure {
    pub fn new(name: impl Into<String>, chainage: f64) -> Self {
        Self {
            name: name.into(),
            chainage,
            ..Default::default()
        }
    }

    pub fn in_composite(mut self, composite: impl Into<String>) -> Self {
        self.composite = Some(composite.into());
        self
    }

    pub fn with_kind(mut self, kind: BranchStructureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Name of the composite this structure belongs to; a lone structure is
    /// its own composite.
    pub fn composite_name(&self) -> &str {
        self.composite.as_deref().unwrap_or(&self.name)
    }
}

/// A cross section on a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSection {
    pub name: String,
    pub chainage: f64,
    /// Name of a shared cross-section definition, if it uses one.
    pub definition: Option<String>,
}

/// A 1D branch between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    pub name: String,
    pub kind: BranchKind,
    pub source: String,
    pub target: String,
    pub length: f64,
    pub order_number: i32,
    pub geometry: Polyline,
    pub structures: Vec<BranchStructure>,
    pub cross_sections: Vec<CrossSection>,
}

impl Default for Branch {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: BranchKind::Channel,
            source: String::new(),
            target: String::new(),
            length: 0.0,
            order_number: NO_ORDER,
            geometry: Polyline::default(),
            structures: Vec::new(),
            cross_sections: Vec::new(),
        }
    }
}

impl Branch {
    pub fn new(name: impl Into<String>, source: impl Into<String>, target: impl Into<String>, length: f64) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            target: target.into(),
            length,
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: BranchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_order_number(mut self, order_number: i32) -> Self {
        self.order_number = order_number;
        self
    }

    pub fn with_geometry(mut self, geometry: Polyline) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_structure(mut self, structure: BranchStructure) -> Self {
        self.structures.push(structure);
        self
    }

    pub fn with_cross_section(mut self, cross_section: CrossSection) -> Self {
        self.cross_sections.push(cross_section);
        self
    }

    pub fn is_channel(&self) -> bool {
        self.kind == BranchKind::Channel
    }

    /// A sewer connection without meaningful length.
    pub fn is_zero_length_sewer_connection(&self) -> bool {
        self.kind == BranchKind::SewerConnection && self.length.abs() < ZERO_LENGTH_TOLERANCE
    }

    /// Structures sorted by chainage, stable for equal chainages.
    pub fn structures_by_chainage(&self) -> Vec<&BranchStructure> {
        let mut structures: Vec<_> = self.structures.iter().collect();
        structures.sort_by(|a, b| a.chainage.total_cmp(&b.chainage));
        structures
    }
}

/// Retention (storage) area attached to the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retention {
    pub name: String,
    pub storage_area: f64,
    pub use_table: bool,
    /// Level against storage.
    pub storage_table: Vec<(f64, f64)>,
}

/// A named route over the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    pub name: String,
}

/// The 1D network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub branches: Vec<Branch>,
    /// Names of shared cross-section definitions.
    pub shared_definitions: Vec<String>,
    pub retentions: Vec<Retention>,
    pub routes: Vec<Route>,
    pub coordinate_system: Option<CoordinateSystem>,
}

impl Network {
    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name == name)
    }

    pub fn channels(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.is_channel())
    }

    /// Branches that start or end at `node`.
    pub fn branches_at<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Branch> + 'a {
        self.branches
            .iter()
            .filter(move |b| b.source == node || b.target == node)
    }

    /// All branch structures with the branch they sit on.
    pub fn structures(&self) -> impl Iterator<Item = (&Branch, &BranchStructure)> {
        self.branches
            .iter()
            .flat_map(|b| b.structures.iter().map(move |s| (b, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_name_defaults_to_own_name() {
        let lone = BranchStructure::new("weir1", 10.0);
        let grouped = BranchStructure::new("pump1", 10.0).in_composite("cs1");
        assert_eq!(lone.composite_name(), "weir1");
        assert_eq!(grouped.composite_name(), "cs1");
    }

    #[test]
    fn test_structures_by_chainage() {
        let branch = Branch::new("b", "n1", "n2", 100.0)
            .with_structure(BranchStructure::new("s2", 60.0))
            .with_structure(BranchStructure::new("s1", 20.0));
        let names: Vec<_> = branch.structures_by_chainage().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["s1", "s2"]);
    }

    #[test]
    fn test_zero_length_sewer_connection() {
        let connection = Branch::new("c", "m1", "m1", 0.0).with_kind(BranchKind::SewerConnection);
        let channel = Branch::new("b", "n1", "n2", 0.0);
        assert!(connection.is_zero_length_sewer_connection());
        assert!(!channel.is_zero_length_sewer_connection());
    }

    #[test]
    fn test_branches_at_node() {
        let network = Network {
            branches: vec![
                Branch::new("a", "n1", "n2", 1.0),
                Branch::new("b", "n2", "n3", 1.0),
                Branch::new("c", "n3", "n4", 1.0),
            ],
            ..Default::default()
        };
        assert_eq!(network.branches_at("n2").count(), 2);
        assert_eq!(network.branches_at("n4").count(), 1);
    }

    #[test]
    fn test_default_order_number() {
        let branch: Branch = serde_json::from_str(r#"{"name": "b1", "length": 10.0}"#).unwrap();
        assert_eq!(branch.order_number, NO_ORDER);
        assert_eq!(branch.kind, BranchKind::Channel);
    }
}
