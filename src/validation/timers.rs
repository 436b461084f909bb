//! Run time, time step and forcing coverage validation.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::boundary::BoundaryData;
use crate::model::time::{at_millis, is_multiple_at, Extrapolation, TimeFrame, TimeSeries, TimeWindow};
use crate::model::HydroModel;
use crate::validation::ModelValidator;
use chrono::TimeDelta;

// ============================================================================
// Generic checks
// ============================================================================

/// Baseline checks on a time frame, shared by every model type.
///
/// Each check can be switched off by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimersCheck {
    pub start_before_stop: bool,
    pub positive_time_step: bool,
    pub max_time_step: bool,
    pub duration_multiple_of_step: bool,
    /// Resolution of the multiple-of-time-step comparisons.
    pub resolution: TimeDelta,
}

impl Default for TimersCheck {
    fn default() -> Self {
        Self {
            start_before_stop: true,
            positive_time_step: true,
            max_time_step: true,
            duration_multiple_of_step: true,
            resolution: TimeDelta::seconds(1),
        }
    }
}

impl TimersCheck {
    pub fn with_resolution(mut self, resolution: TimeDelta) -> Self {
        self.resolution = resolution;
        self
    }

    /// Run the enabled checks against `frame`.
    pub fn check(&self, frame: &TimeFrame) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let subject = time_frame_ref();

        if self.start_before_stop && frame.start_time >= frame.stop_time {
            issues.push(ValidationIssue::error(
                subject.clone(),
                "Model start time must be earlier than model stop time.",
            ));
        }

        let step_valid = frame.time_step > TimeDelta::zero();
        if self.positive_time_step && !step_valid {
            issues.push(ValidationIssue::error(
                subject.clone(),
                "User time step must be larger than zero.",
            ));
        }

        if self.max_time_step {
            if frame.max_time_step <= TimeDelta::zero() {
                issues.push(ValidationIssue::error(
                    subject.clone(),
                    "Maximum time step must be larger than zero.",
                ));
            } else if step_valid && frame.max_time_step > frame.time_step {
                issues.push(ValidationIssue::error(
                    subject.clone(),
                    "Maximum time step must not be larger than the user time step.",
                ));
            }
        }

        if self.duration_multiple_of_step
            && step_valid
            && !is_multiple_at(frame.stop_time - frame.start_time, frame.time_step, self.resolution)
        {
            issues.push(ValidationIssue::error(
                subject,
                "Model run duration must be a multiple of the user time step.",
            ));
        }

        issues
    }
}

fn time_frame_ref() -> FeatureRef {
    FeatureRef::new(FeatureKind::TimeFrame, "time frame")
}

// ============================================================================
// Model validator
// ============================================================================

/// Validator for the model time frame, output intervals and forcing coverage.
pub struct TimersValidator {
    check: TimersCheck,
}

impl TimersValidator {
    pub fn new() -> Self {
        Self {
            check: TimersCheck::default(),
        }
    }

    pub fn with_check(check: TimersCheck) -> Self {
        Self { check }
    }
}

impl Default for TimersValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelValidator for TimersValidator {
    fn name(&self) -> &str {
        "Timers"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let frame = &model.time_frame;
        let mut issues = self.check.check(frame);

        if frame.reference_time > frame.start_time {
            issues.push(ValidationIssue::error(
                time_frame_ref(),
                "Model reference time must not be later than model start time.",
            ));
        }

        for (name, stream) in model.output.streams() {
            if stream.enabled && !is_multiple_at(stream.interval, frame.time_step, self.check.resolution) {
                issues.push(ValidationIssue::error(
                    FeatureRef::new(FeatureKind::OutputSettings, name),
                    format!("{} output interval must be a multiple of the user time step.", name),
                ));
            }
        }

        issues.extend(forcing_issues(model));

        ValidationReport::leaf(self.name(), issues)
    }
}

/// Coverage of boundary and lateral time series at millisecond resolution.
fn forcing_issues(model: &HydroModel) -> Vec<ValidationIssue> {
    let frame = &model.time_frame;
    let mut issues = Vec::new();

    for set in &model.boundary_conditions {
        for condition in &set.conditions {
            let Some(window) = frame.run_window_in(condition.time_zone) else {
                continue;
            };
            for point in &condition.point_data {
                if let BoundaryData::TimeSeries(series) = &point.data {
                    let owner = format!(
                        "Boundary condition '{}' at point {}",
                        condition.description(),
                        set.feature.point_name(point.index)
                    );
                    let subject = FeatureRef::new(FeatureKind::BoundaryCondition, condition.description());
                    issues.extend(series_coverage(&owner, series, &window, &subject));
                }
            }
        }
    }

    for lateral in &model.laterals {
        if let Some(series) = lateral.discharge.as_series() {
            let owner = format!("Lateral '{}'", lateral.name);
            let subject = FeatureRef::new(FeatureKind::Lateral, &lateral.name);
            issues.extend(series_coverage(&owner, series, &frame.run_window(), &subject));
        }
    }

    issues
}

fn series_coverage(
    owner: &str,
    series: &TimeSeries,
    window: &TimeWindow,
    subject: &FeatureRef,
) -> Vec<ValidationIssue> {
    let (Some(first), Some(last)) = (series.first_time(), series.last_time()) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    if at_millis(first) > at_millis(window.start) {
        issues.push(ValidationIssue::error(
            subject.clone(),
            format!("{}: time series starts after the model start time.", owner),
        ));
    }
    if at_millis(last) < at_millis(window.stop) {
        issues.push(ValidationIssue::error(
            subject.clone(),
            format!("{}: time series ends before the model stop time.", owner),
        ));
    }
    if !window.is_covered_by(series) && series.extrapolation != Extrapolation::None {
        issues.push(ValidationIssue::error(
            subject.clone(),
            format!(
                "{}: time series does not span the model run and cannot be extrapolated by the computational core.",
                owner
            ),
        ));
    }
    issues
}
