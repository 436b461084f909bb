//! Boundary conditions and lateral sources.

use crate::model::geometry::Polyline;
use crate::model::time::{serde_seconds, TimeDependent, TimeSeries};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

// ============================================================================
// Quantities
// ============================================================================

/// Physical quantity prescribed by a flow boundary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowQuantity {
    WaterLevel,
    Velocity,
    Discharge,
    Riemann,
    RiemannVelocity,
    Neumann,
    Outflow,
    NormalVelocity,
    TangentVelocity,
    VelocityVector,
    Salinity,
    Temperature,
    SedimentConcentration,
    Tracer,
    MorphologyBedLevelPrescribed,
    MorphologyBedLevelChangePrescribed,
    MorphologyBedLoadTransport,
    MorphologyNoBedLevelConstraint,
    MorphologyBedLevelFixed,
}

impl FlowQuantity {
    /// The five morphology quantities.
    pub const MORPHOLOGY: [FlowQuantity; 5] = [
        FlowQuantity::MorphologyBedLevelPrescribed,
        FlowQuantity::MorphologyBedLevelChangePrescribed,
        FlowQuantity::MorphologyBedLoadTransport,
        FlowQuantity::MorphologyNoBedLevelConstraint,
        FlowQuantity::MorphologyBedLevelFixed,
    ];

    /// Human readable name.
    pub fn description(&self) -> &'static str {
        match self {
            FlowQuantity::WaterLevel => "Water level",
            FlowQuantity::Velocity => "Velocity",
            FlowQuantity::Discharge => "Discharge",
            FlowQuantity::Riemann => "Riemann invariant",
            FlowQuantity::RiemannVelocity => "Riemann velocity",
            FlowQuantity::Neumann => "Neumann gradient",
            FlowQuantity::Outflow => "Outflow",
            FlowQuantity::NormalVelocity => "Normal velocity",
            FlowQuantity::TangentVelocity => "Tangential velocity",
            FlowQuantity::VelocityVector => "Velocity vector",
            FlowQuantity::Salinity => "Salinity",
            FlowQuantity::Temperature => "Temperature",
            FlowQuantity::SedimentConcentration => "Sediment concentration",
            FlowQuantity::Tracer => "Tracer",
            FlowQuantity::MorphologyBedLevelPrescribed => "Bed level prescribed",
            FlowQuantity::MorphologyBedLevelChangePrescribed => "Bed level change prescribed",
            FlowQuantity::MorphologyBedLoadTransport => "Bed load transport",
            FlowQuantity::MorphologyNoBedLevelConstraint => "Bed level unconstrained",
            FlowQuantity::MorphologyBedLevelFixed => "Bed level fixed",
        }
    }

    pub fn is_morphology(&self) -> bool {
        Self::MORPHOLOGY.contains(self)
    }

    /// Quantities that may accompany any combination.
    pub fn is_always_allowed(&self) -> bool {
        matches!(
            self,
            FlowQuantity::Salinity
                | FlowQuantity::Temperature
                | FlowQuantity::SedimentConcentration
                | FlowQuantity::Tracer
        )
    }

    /// Quantities whose values must never be negative.
    pub fn is_strictly_positive(&self) -> bool {
        self.is_always_allowed()
    }

    /// Hydrodynamic quantities, i.e. neither always-allowed nor morphology.
    pub fn is_hydro(&self) -> bool {
        !self.is_always_allowed() && !self.is_morphology()
    }
}

// ============================================================================
// Condition data
// ============================================================================

/// One astronomical constituent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstroComponent {
    pub name: String,
    pub amplitude: f64,
    pub phase: f64,
}

/// One harmonic constituent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonicComponent {
    /// Frequency in degrees per hour.
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
}

/// Data prescribed at one support point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryData {
    TimeSeries(TimeSeries),
    Astronomical { components: Vec<AstroComponent> },
    Harmonic { components: Vec<HarmonicComponent> },
    QhTable { table: Vec<(f64, f64)> },
    Constant { value: f64 },
}

impl BoundaryData {
    pub fn as_time_series(&self) -> Option<&TimeSeries> {
        match self {
            BoundaryData::TimeSeries(series) => Some(series),
            _ => None,
        }
    }

    /// Whether any values were generated or entered for this point.
    pub fn has_values(&self) -> bool {
        match self {
            BoundaryData::TimeSeries(series) => !series.is_empty(),
            BoundaryData::Astronomical { components } => !components.is_empty(),
            BoundaryData::Harmonic { components } => !components.is_empty(),
            BoundaryData::QhTable { table } => !table.is_empty(),
            BoundaryData::Constant { .. } => true,
        }
    }
}

/// Data attached to the support point at `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    pub index: usize,
    pub data: BoundaryData,
}

/// Shape of the vertical distribution of a 3D boundary condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalProfileKind {
    #[default]
    Uniform,
    TopBottom,
    PercentageFromBed,
}

/// Vertical profile definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalProfile {
    pub kind: VerticalProfileKind,
    /// Layer heights; percentages for [`VerticalProfileKind::PercentageFromBed`].
    pub heights: Vec<f64>,
}

/// A boundary condition for one quantity on one boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowBoundaryCondition {
    pub quantity: FlowQuantity,
    pub tracer_name: Option<String>,
    pub sediment_fractions: Vec<String>,
    /// Offset of the data times relative to UTC.
    #[serde(with = "serde_seconds")]
    pub time_zone: TimeDelta,
    pub point_data: Vec<PointData>,
    pub vertical_profile: Option<VerticalProfile>,
}

impl Default for FlowBoundaryCondition {
    fn default() -> Self {
        Self {
            quantity: FlowQuantity::WaterLevel,
            tracer_name: None,
            sediment_fractions: Vec::new(),
            time_zone: TimeDelta::zero(),
            point_data: Vec::new(),
            vertical_profile: None,
        }
    }
}

impl FlowBoundaryCondition {
    pub fn new(quantity: FlowQuantity) -> Self {
        Self {
            quantity,
            ..Default::default()
        }
    }

    pub fn tracer(name: impl Into<String>) -> Self {
        Self {
            quantity: FlowQuantity::Tracer,
            tracer_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_point(mut self, index: usize, data: BoundaryData) -> Self {
        self.point_data.push(PointData { index, data });
        self
    }

    pub fn with_series(self, index: usize, series: TimeSeries) -> Self {
        self.with_point(index, BoundaryData::TimeSeries(series))
    }

    pub fn with_time_zone(mut self, time_zone: TimeDelta) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_vertical_profile(mut self, profile: VerticalProfile) -> Self {
        self.vertical_profile = Some(profile);
        self
    }

    /// Name used in messages; tracers are named after the tracer.
    pub fn description(&self) -> String {
        match (&self.quantity, &self.tracer_name) {
            (FlowQuantity::Tracer, Some(name)) => name.clone(),
            (quantity, _) => quantity.description().to_string(),
        }
    }
}

// ============================================================================
// Boundaries
// ============================================================================

/// Physical boundary line with its support point names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryFeature {
    pub name: String,
    pub geometry: Polyline,
    /// Support point names by index; missing entries use the default name.
    pub support_points: Vec<String>,
}

impl BoundaryFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Default name of the support point at `index`.
    pub fn default_point_name(&self, index: usize) -> String {
        format!("{}_{:04}", self.name, index + 1)
    }

    /// Name of the support point at `index`.
    pub fn point_name(&self, index: usize) -> String {
        match self.support_points.get(index) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.default_point_name(index),
        }
    }
}

/// All conditions attached to one boundary feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConditionSet {
    pub feature: BoundaryFeature,
    pub conditions: Vec<FlowBoundaryCondition>,
}

impl BoundaryConditionSet {
    pub fn new(feature: BoundaryFeature) -> Self {
        Self {
            feature,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: FlowBoundaryCondition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Lateral discharge source on the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lateral {
    pub name: String,
    /// Discharge is supplied at run time by a coupled model.
    pub realtime: bool,
    pub discharge: TimeDependent,
}

impl Lateral {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }

    pub fn with_discharge(mut self, discharge: TimeDependent) -> Self {
        self.discharge = discharge;
        self
    }
}
