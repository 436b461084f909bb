//! Fixtures shared by validator tests.

use crate::core::context::ValidationContext;
use crate::core::report::ValidationReport;
use crate::core::settings::ValidationSettings;
use crate::model::time::TimeFrame;
use crate::model::HydroModel;
use crate::validation::ModelValidator;
use chrono::{NaiveDate, NaiveDateTime};

/// 2000-01-01 plus `hours`.
pub fn at(hours: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::TimeDelta::hours(hours)
}

/// A model running from hour 0 to hour 24.
pub fn model() -> HydroModel {
    let mut model = HydroModel::new("test model");
    model.time_frame = TimeFrame::new(at(0), at(24));
    model
}

/// Run one validator with default settings.
pub fn run(validator: &dyn ModelValidator, model: &HydroModel) -> ValidationReport {
    run_with(validator, model, &ValidationSettings::default())
}

pub fn run_with(
    validator: &dyn ModelValidator,
    model: &HydroModel,
    settings: &ValidationSettings,
) -> ValidationReport {
    validator.validate(&ValidationContext::new(model, settings))
}

/// Messages of every issue in the report tree.
pub fn messages(report: &ValidationReport) -> Vec<String> {
    report.all_issues().iter().map(|i| i.message().to_string()).collect()
}
