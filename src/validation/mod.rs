//! Validation of a model snapshot before it is run.
//!
//! Each validator is an independent projection over the same read-only
//! snapshot and returns its own report. The [`ValidationPipeline`] runs them
//! in a fixed order and assembles the root report.

pub mod area;
pub mod boundary;
pub mod common;
pub mod definition;
pub mod embankment;
pub mod grid;
pub mod links;
pub mod meteo;
pub mod network;
pub mod pipeline;
pub mod roughness;
pub mod sediment;
pub mod structures;
pub mod timers;
pub mod wind;

#[cfg(test)]
pub(crate) mod testing;

use crate::core::context::ValidationContext;
use crate::core::report::ValidationReport;
use crate::model::HydroModel;

pub use area::Area2DValidator;
pub use boundary::BoundaryConditionValidator;
pub use definition::ModelDefinitionValidator;
pub use embankment::EmbankmentValidator;
pub use grid::ComputationalGridValidator;
pub use links::HydroLinksValidator;
pub use meteo::MeteoValidator;
pub use network::NetworkValidator;
pub use pipeline::ValidationPipeline;
pub use roughness::RoughnessValidator;
pub use sediment::SedimentValidator;
pub use structures::StructureLocationValidator;
pub use timers::{TimersCheck, TimersValidator};
pub use wind::WindValidator;

/// Trait for model validators.
pub trait ModelValidator: Send + Sync {
    /// Name of this validator, also the name of its report.
    fn name(&self) -> &str;

    /// Whether this validator takes part for the given model.
    fn applies_to(&self, _model: &HydroModel) -> bool {
        true
    }

    /// Validate the model.
    ///
    /// Findings are returned as issues; a validator never fails.
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport;
}
