//! Numerical parameters of the model definition.

use serde::{Deserialize, Serialize};

/// Where bed levels are located on the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedLevelType {
    #[default]
    Faces,
    Nodes,
    VelocityPoints,
}

/// Conveyance formulation in 2D.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conveyance2D {
    #[default]
    RIsHu,
    RIsH,
    RIsAOverP,
    Kisanalytic1D,
    Kisanalytic2D,
}

impl Conveyance2D {
    pub fn is_analytic(&self) -> bool {
        matches!(self, Conveyance2D::Kisanalytic1D | Conveyance2D::Kisanalytic2D)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Conveyance2D::RIsHu => "R=HU",
            Conveyance2D::RIsH => "R=H",
            Conveyance2D::RIsAOverP => "R=A/P",
            Conveyance2D::Kisanalytic1D => "K=analytic-1D conv",
            Conveyance2D::Kisanalytic2D => "K=analytic-2D conv",
        }
    }
}

/// Numerical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Theta of the time integration.
    pub teta0: f64,
    /// Number of vertical layers, 0 for depth averaged.
    pub kmx: i32,
    /// Thickness of the top layer in z-layer models.
    pub dz_top: f64,
    pub bed_level_type: BedLevelType,
    pub conveyance_2d: Conveyance2D,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            teta0: 0.55,
            kmx: 0,
            dz_top: 1.0,
            bed_level_type: BedLevelType::Faces,
            conveyance_2d: Conveyance2D::RIsHu,
        }
    }
}
