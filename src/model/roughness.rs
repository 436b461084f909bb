//! Friction definitions per channel.

use serde::{Deserialize, Serialize};

/// Friction value at a chainage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainageValue {
    pub chainage: f64,
    pub value: f64,
}

/// Friction table (discharge or water level against friction) at a chainage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainageTable {
    pub chainage: f64,
    pub table: Vec<(f64, f64)>,
}

/// How friction varies along a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum FrictionFunction {
    Constant { values: Vec<ChainageValue> },
    FunctionOfDischarge { tables: Vec<ChainageTable> },
    FunctionOfWaterLevel { tables: Vec<ChainageTable> },
}

impl FrictionFunction {
    /// Label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            FrictionFunction::Constant { .. } => "Constant",
            FrictionFunction::FunctionOfDischarge { .. } => "absDischarge",
            FrictionFunction::FunctionOfWaterLevel { .. } => "Waterlevel",
        }
    }

    /// Chainages at which values are defined, in definition order.
    pub fn chainages(&self) -> Vec<f64> {
        match self {
            FrictionFunction::Constant { values } => values.iter().map(|v| v.chainage).collect(),
            FrictionFunction::FunctionOfDischarge { tables }
            | FrictionFunction::FunctionOfWaterLevel { tables } => {
                tables.iter().map(|t| t.chainage).collect()
            }
        }
    }
}

/// Where the friction of a channel comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrictionSpecification {
    /// Global model friction.
    #[default]
    ModelSettings,
    /// Friction per roughness section of the cross sections.
    RoughnessSections,
    /// Friction given along the channel.
    Spatial { function: FrictionFunction },
}

impl FrictionSpecification {
    pub fn label(&self) -> &'static str {
        match self {
            FrictionSpecification::ModelSettings => "ModelSettings",
            FrictionSpecification::RoughnessSections => "RoughnessSections",
            FrictionSpecification::Spatial { .. } => "OnLocations",
        }
    }

    pub fn is_by_roughness_sections(&self) -> bool {
        matches!(self, FrictionSpecification::RoughnessSections)
    }
}

/// Friction of one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelFriction {
    pub channel: String,
    pub specification: FrictionSpecification,
}

impl ChannelFriction {
    pub fn new(channel: impl Into<String>, specification: FrictionSpecification) -> Self {
        Self {
            channel: channel.into(),
            specification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chainages() {
        let function = FrictionFunction::FunctionOfDischarge {
            tables: vec![
                ChainageTable { chainage: 10.0, table: vec![(0.0, 30.0)] },
                ChainageTable { chainage: 5.0, table: Vec::new() },
            ],
        };
        assert_eq!(function.chainages(), vec![10.0, 5.0]);
        assert_eq!(function.label(), "absDischarge");
    }

    #[test]
    fn test_specification_json() {
        let spec: FrictionSpecification = serde_json::from_str(
            r#"{"type": "spatial", "function": {"function": "constant", "values": [{"chainage": 1.0, "value": 45.0}]}}"#,
        )
        .unwrap();
        assert_eq!(spec.label(), "OnLocations");
        assert!(!spec.is_by_roughness_sections());
    }
}
