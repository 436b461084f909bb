//! Meteorological forcing validation.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::validation::common::series_presence_and_span;
use crate::validation::ModelValidator;

/// Validator for meteo fields and the heat flux model.
pub struct MeteoValidator;

impl ModelValidator for MeteoValidator {
    fn name(&self) -> &str {
        "Meteo"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let meteo = &ctx.model.meteo;
        let window = ctx.model.time_frame.run_window();
        let mut issues = Vec::new();

        if meteo.heat_flux_model.needs_meteo() && meteo.fields.is_empty() {
            issues.push(ValidationIssue::error(
                FeatureRef::new(FeatureKind::MeteoField, "meteo"),
                "Composite Model option is selected for Temperature, however no Meteo Data was specified.",
            ));
        }

        for field in &meteo.fields {
            let subject = FeatureRef::new(FeatureKind::MeteoField, &field.name);
            let owner = format!("Meteo field '{}'", field.name);
            issues.extend(series_presence_and_span(&owner, "meteo", &field.series, &window, &subject));
        }

        ValidationReport::leaf(self.name(), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::meteo::{HeatFluxModel, MeteoField};
    use crate::model::time::TimeSeries;
    use crate::validation::testing::{at, messages, model, run};

    #[test]
    fn test_composite_needs_meteo() {
        let mut model = model();
        model.meteo.heat_flux_model = HeatFluxModel::Composite;
        let report = run(&MeteoValidator, &model);
        assert_eq!(
            messages(&report),
            vec!["Composite Model option is selected for Temperature, however no Meteo Data was specified."]
        );

        model.meteo.heat_flux_model = HeatFluxModel::Excess;
        assert!(run(&MeteoValidator, &model).is_empty());
    }

    #[test]
    fn test_field_series() {
        let mut model = model();
        model.meteo.heat_flux_model = HeatFluxModel::Composite;
        model.meteo.fields = vec![
            MeteoField {
                name: "humidity".to_string(),
                series: TimeSeries::constant(vec![at(0), at(24)], 80.0),
            },
            MeteoField {
                name: "cloudiness".to_string(),
                series: TimeSeries::default(),
            },
            MeteoField {
                name: "air temperature".to_string(),
                series: TimeSeries::constant(vec![at(2), at(24)], 12.0),
            },
        ];
        let report = run(&MeteoValidator, &model);
        assert_eq!(
            messages(&report),
            vec![
                "Meteo field 'cloudiness': meteo time series does not contain any values.",
                "Meteo field 'air temperature': meteo time series does not span the model run interval.",
            ]
        );
    }
}
