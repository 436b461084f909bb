//! Validation pipeline implementation.

use crate::core::context::ValidationContext;
use crate::core::error::{HydroError, HydroResult};
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::core::settings::ValidationSettings;
use crate::model::HydroModel;
use crate::validation::{
    Area2DValidator, BoundaryConditionValidator, ComputationalGridValidator, EmbankmentValidator,
    HydroLinksValidator, MeteoValidator, ModelDefinitionValidator, ModelValidator,
    NetworkValidator, RoughnessValidator, SedimentValidator, StructureLocationValidator,
    TimersValidator, WindValidator,
};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Ordered set of validators run over one model snapshot.
///
/// Every validator runs in isolation: a validator that panics is turned into
/// a report holding a single error and the others still run. The root report
/// is named after the model and holds one child report per validator, in
/// pipeline order.
pub struct ValidationPipeline {
    validators: Vec<Box<dyn ModelValidator>>,
}

impl ValidationPipeline {
    /// Create a pipeline with the given validators.
    pub fn new(validators: Vec<Box<dyn ModelValidator>>) -> Self {
        Self { validators }
    }

    /// Create the pipeline with all standard validators.
    pub fn default_pipeline() -> Self {
        Self {
            validators: vec![
                Box::new(ModelDefinitionValidator),
                Box::new(NetworkValidator),
                Box::new(ComputationalGridValidator),
                Box::new(StructureLocationValidator),
                Box::new(BoundaryConditionValidator),
                Box::new(TimersValidator::new()),
                Box::new(RoughnessValidator),
                Box::new(MeteoValidator),
                Box::new(WindValidator),
                Box::new(SedimentValidator),
                Box::new(Area2DValidator),
                Box::new(EmbankmentValidator),
                Box::new(HydroLinksValidator),
            ],
        }
    }

    /// Add a validator at the end of the pipeline.
    pub fn add_validator(&mut self, validator: Box<dyn ModelValidator>) {
        self.validators.push(validator);
    }

    /// Names of the validators, in run order.
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Validate a model snapshot.
    ///
    /// Fails before any validator runs when the model is missing or the
    /// settings are out of range. Otherwise the report is always complete.
    pub fn validate(
        &self,
        model: Option<&HydroModel>,
        settings: &ValidationSettings,
    ) -> HydroResult<ValidationReport> {
        let model = model.ok_or(HydroError::MissingModel)?;
        settings.check()?;

        let start = Instant::now();
        let ctx = ValidationContext::new(model, settings);
        let active: Vec<&dyn ModelValidator> = self
            .validators
            .iter()
            .map(Box::as_ref)
            .filter(|v| v.applies_to(model))
            .collect();

        let sub_reports: Vec<ValidationReport> = if settings.parallel {
            active.par_iter().map(|v| run_isolated(*v, &ctx)).collect()
        } else {
            active.iter().map(|v| run_isolated(*v, &ctx)).collect()
        };

        let report = ValidationReport::new(model.name.clone(), Vec::new(), sub_reports);
        log::info!(
            "Validated '{}' with {} validator(s) in {} ms: {} error(s), {} warning(s)",
            model.name,
            active.len(),
            start.elapsed().as_millis(),
            report.error_count(),
            report.warning_count()
        );
        Ok(report)
    }

    /// Quick check whether the model may be run.
    pub fn can_run(&self, model: &HydroModel, settings: &ValidationSettings) -> HydroResult<bool> {
        Ok(!self.validate(Some(model), settings)?.has_errors())
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

fn run_isolated(validator: &dyn ModelValidator, ctx: &ValidationContext<'_>) -> ValidationReport {
    let name = validator.name();
    log::debug!("Running validator '{}'", name);

    match panic::catch_unwind(AssertUnwindSafe(|| validator.validate(ctx))) {
        Ok(report) => {
            log::info!(
                "Validator '{}': {} error(s), {} warning(s), {} info",
                name,
                report.error_count(),
                report.warning_count(),
                report.info_count()
            );
            report
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Validator '{}' panicked: {}", name, message);
            ValidationReport::leaf(
                name,
                vec![ValidationIssue::error(
                    FeatureRef::new(FeatureKind::Validator, name),
                    format!("Validator '{}' failed: {}", name, message),
                )],
            )
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
