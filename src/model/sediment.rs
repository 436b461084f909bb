//! Sediment fractions and morphology settings.

use serde::{Deserialize, Serialize};

/// How a spatially varying property got its values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialOperationKind {
    /// Raw point values, not yet interpolated to the grid.
    ValueOperation,
    /// Values interpolated onto the grid.
    #[default]
    Interpolated,
    /// One value everywhere.
    Uniform,
}

/// A property of a fraction that may vary in space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialProperty {
    pub name: String,
    pub spatially_varying: bool,
    pub operation: SpatialOperationKind,
}

impl SpatialProperty {
    pub fn spatial(name: impl Into<String>, operation: SpatialOperationKind) -> Self {
        Self {
            name: name.into(),
            spatially_varying: true,
            operation,
        }
    }
}

/// One sediment fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SedimentFraction {
    pub name: String,
    pub initial_thickness: f64,
    pub properties: Vec<SpatialProperty>,
}

impl SedimentFraction {
    pub fn new(name: impl Into<String>, initial_thickness: f64) -> Self {
        Self {
            name: name.into(),
            initial_thickness,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: SpatialProperty) -> Self {
        self.properties.push(property);
        self
    }
}

/// Morphology switch and the fractions it transports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SedimentSettings {
    pub morphology_active: bool,
    pub fractions: Vec<SedimentFraction>,
}
