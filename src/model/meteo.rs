//! Wind and meteorological forcing.

use crate::model::time::TimeSeries;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a wind field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindSource {
    /// Spatially uniform velocity components over time.
    Uniform { series: TimeSeries },
    /// Spatially uniform magnitude and direction over time.
    UniformMagnitudeDirection { series: TimeSeries },
    /// Gridded field files, one per quantity.
    Gridded { files: Vec<PathBuf> },
    /// Cyclone spiderweb file.
    Spiderweb { file: PathBuf },
}

impl WindSource {
    pub fn series(&self) -> Option<&TimeSeries> {
        match self {
            WindSource::Uniform { series } | WindSource::UniformMagnitudeDirection { series } => Some(series),
            _ => None,
        }
    }

    pub fn files(&self) -> Vec<&PathBuf> {
        match self {
            WindSource::Gridded { files } => files.iter().collect(),
            WindSource::Spiderweb { file } => vec![file],
            _ => Vec::new(),
        }
    }
}

/// A wind forcing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    pub name: String,
    pub source: WindSource,
}

/// Heat flux model used for temperature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatFluxModel {
    #[default]
    None,
    TransportOnly,
    Excess,
    Composite,
}

impl HeatFluxModel {
    pub fn needs_meteo(&self) -> bool {
        matches!(self, HeatFluxModel::Composite)
    }
}

/// A meteo forcing item (humidity, air temperature, cloudiness, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteoField {
    pub name: String,
    pub series: TimeSeries,
}

/// Meteorological input of the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteoSettings {
    pub heat_flux_model: HeatFluxModel,
    pub fields: Vec<MeteoField>,
}
