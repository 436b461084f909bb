//! Links between rainfall-runoff areas and the flow model.

use serde::{Deserialize, Serialize};

/// Kind of entity at either end of a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkEndpointKind {
    #[default]
    Catchment,
    WasteWaterTreatmentPlant,
    Lateral,
    Boundary,
    RunoffBoundary,
}

impl LinkEndpointKind {
    /// Sources allowed to feed a realtime lateral.
    pub fn is_realtime_source(&self) -> bool {
        matches!(
            self,
            LinkEndpointKind::Catchment | LinkEndpointKind::WasteWaterTreatmentPlant
        )
    }
}

/// One end of a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEndpoint {
    pub kind: LinkEndpointKind,
    pub name: String,
}

impl LinkEndpoint {
    pub fn new(kind: LinkEndpointKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Directed link from a source to a target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroLink {
    pub name: String,
    pub source: LinkEndpoint,
    pub target: LinkEndpoint,
}

impl HydroLink {
    pub fn new(name: impl Into<String>, source: LinkEndpoint, target: LinkEndpoint) -> Self {
        Self {
            name: name.into(),
            source,
            target,
        }
    }
}
