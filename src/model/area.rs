//! 2D area features: thin dams, sources/sinks, fixed weirs, structures and
//! embankments.

use crate::model::geometry::Polyline;
use crate::model::time::{TimeDependent, TimeSeries};
use serde::{Deserialize, Serialize};

/// Line that blocks flow between cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinDam {
    pub name: String,
    pub geometry: Polyline,
}

/// Point or line discharge into the 2D domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSink {
    pub name: String,
    pub geometry: Polyline,
    pub discharge: TimeSeries,
}

/// Crest and ground heights at one fixed weir vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedWeirPoint {
    pub crest_level: f64,
    pub ground_height_left: f64,
    pub ground_height_right: f64,
}

impl FixedWeirPoint {
    /// Sill depths on the left and right side.
    pub fn sill_depths(&self) -> [f64; 2] {
        [
            self.crest_level - self.ground_height_left,
            self.crest_level - self.ground_height_right,
        ]
    }
}

/// Subgrid weir along a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedWeir {
    pub name: String,
    pub geometry: Polyline,
    pub points: Vec<FixedWeirPoint>,
}

// ============================================================================
// Structures
// ============================================================================

/// Direction in which a general structure gate opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOpeningDirection {
    #[default]
    Symmetric,
    FromLeft,
    FromRight,
}

/// Gate part shared by gated weirs and general structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    pub gate_height: f64,
    pub opening_width: TimeDependent,
    pub lower_edge_level: TimeDependent,
}

/// Discharge formula of a 2D weir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum WeirFormula {
    Simple {
        lateral_contraction: f64,
    },
    Gated {
        gate: GateSettings,
    },
    General {
        gate: GateSettings,
        horizontal_direction: GateOpeningDirection,
        upstream1_width: Option<f64>,
        upstream2_width: Option<f64>,
        downstream1_width: Option<f64>,
        downstream2_width: Option<f64>,
    },
}

impl Default for WeirFormula {
    fn default() -> Self {
        WeirFormula::Simple {
            lateral_contraction: 1.0,
        }
    }
}

impl WeirFormula {
    pub fn name(&self) -> &'static str {
        match self {
            WeirFormula::Simple { .. } => "Simple weir",
            WeirFormula::Gated { .. } => "Gated weir",
            WeirFormula::General { .. } => "General structure",
        }
    }
}

/// 2D weir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weir2D {
    pub crest_level: TimeDependent,
    /// `None` lets the computational core derive the width.
    pub crest_width: Option<f64>,
    pub correction_coefficient: f64,
    pub formula: WeirFormula,
}

impl Default for Weir2D {
    fn default() -> Self {
        Self {
            crest_level: TimeDependent::Constant(0.0),
            crest_width: None,
            correction_coefficient: 1.0,
            formula: WeirFormula::default(),
        }
    }
}

/// Side of a pump whose levels control it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpControlDirection {
    #[default]
    Suction,
    Delivery,
    Both,
}

impl PumpControlDirection {
    pub fn controls_suction(&self) -> bool {
        matches!(self, PumpControlDirection::Suction | PumpControlDirection::Both)
    }

    pub fn controls_delivery(&self) -> bool {
        matches!(self, PumpControlDirection::Delivery | PumpControlDirection::Both)
    }
}

/// 2D pump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pump2D {
    pub capacity: TimeDependent,
    pub control_direction: PumpControlDirection,
    pub suction_start: f64,
    pub suction_stop: f64,
    pub delivery_start: f64,
    pub delivery_stop: f64,
}

/// 2D gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gate2D {
    pub door_height: f64,
    pub sill_level: TimeDependent,
    pub opening_width: TimeDependent,
    pub lower_edge_level: TimeDependent,
}

/// Kind specific data of a 2D structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructureKind2D {
    Weir(Weir2D),
    Pump(Pump2D),
    Gate(Gate2D),
}

impl StructureKind2D {
    /// Label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            StructureKind2D::Weir(_) => "weir",
            StructureKind2D::Pump(_) => "pump",
            StructureKind2D::Gate(_) => "gate",
        }
    }
}

/// Structure placed in the 2D domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure2D {
    pub name: String,
    #[serde(default)]
    pub geometry: Polyline,
    pub kind: StructureKind2D,
}

impl Structure2D {
    pub fn new(name: impl Into<String>, geometry: Polyline, kind: StructureKind2D) -> Self {
        Self {
            name: name.into(),
            geometry,
            kind,
        }
    }
}

/// Raised line feature such as a dike or levee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embankment {
    pub name: String,
    pub geometry: Polyline,
}

impl Embankment {
    pub fn new(name: impl Into<String>, geometry: Polyline) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }
}

/// All 2D area features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Area2D {
    pub thin_dams: Vec<ThinDam>,
    pub source_sinks: Vec<SourceSink>,
    pub fixed_weirs: Vec<FixedWeir>,
    pub structures: Vec<Structure2D>,
    pub embankments: Vec<Embankment>,
}
