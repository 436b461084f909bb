//! Read-only model snapshot consumed by the validators.
//!
//! The snapshot is plain data: every collection keeps the order the caller
//! gave it, and validators iterate in that order. Snapshots load from JSON so
//! the command line front-end can validate exported models.

pub mod area;
pub mod boundary;
pub mod definition;
pub mod discretization;
pub mod geometry;
pub mod links;
pub mod meteo;
pub mod network;
pub mod roughness;
pub mod sediment;
pub mod time;

use serde::{Deserialize, Serialize};

pub use area::{Area2D, Embankment, Structure2D, StructureKind2D};
pub use boundary::{BoundaryConditionSet, BoundaryFeature, FlowBoundaryCondition, FlowQuantity, Lateral};
pub use definition::ModelParameters;
pub use discretization::{BranchEnd, Discretization, Grid2D, NetworkLocation};
pub use geometry::{Point, Polyline};
pub use links::{HydroLink, LinkEndpoint, LinkEndpointKind};
pub use meteo::{MeteoSettings, WindField, WindSource};
pub use network::{Branch, BranchStructure, Network, Node};
pub use roughness::{ChannelFriction, FrictionFunction, FrictionSpecification};
pub use sediment::{SedimentFraction, SedimentSettings};
pub use time::{OutputSettings, TimeDependent, TimeFrame, TimeSeries, TimeWindow};

/// Complete hydrodynamic model snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroModel {
    pub name: String,
    pub parameters: ModelParameters,
    pub network: Network,
    pub discretization: Discretization,
    pub grid: Option<Grid2D>,
    pub time_frame: TimeFrame,
    pub output: OutputSettings,
    pub boundary_conditions: Vec<BoundaryConditionSet>,
    pub laterals: Vec<Lateral>,
    pub roughness: Vec<ChannelFriction>,
    pub sediment: SedimentSettings,
    pub meteo: MeteoSettings,
    pub wind: Vec<WindField>,
    pub area: Area2D,
    pub links: Vec<HydroLink>,
}

impl HydroModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether sediment transport and bed level change are enabled.
    pub fn morphology_active(&self) -> bool {
        self.sediment.morphology_active
    }

    /// The 2D grid when one exists and has cells.
    pub fn active_grid(&self) -> Option<&Grid2D> {
        self.grid.as_ref().filter(|g| !g.is_empty())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
