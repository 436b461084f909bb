use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hydro_validate::model::boundary::{BoundaryConditionSet, BoundaryFeature, FlowBoundaryCondition, FlowQuantity};
use hydro_validate::model::time::{TimeFrame, TimeSeries};
use hydro_validate::prelude::*;
use hydro_validate::validation::BoundaryConditionValidator;
use proptest::prelude::*;

const LIMIT_SECONDS: i64 = 12 * 3600;

fn at(hours: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap() + TimeDelta::hours(hours)
}

/// Water level boundary whose series covers the run for any shift within a day.
fn model_with_time_zone(seconds: i64) -> HydroModel {
    let mut model = HydroModel::new("time zones");
    model.time_frame = TimeFrame::new(at(0), at(24));
    let series = TimeSeries::constant(vec![at(-48), at(72)], 1.0);
    model.boundary_conditions.push(
        BoundaryConditionSet::new(BoundaryFeature::new("sea")).with_condition(
            FlowBoundaryCondition::new(FlowQuantity::WaterLevel)
                .with_series(0, series)
                .with_time_zone(TimeDelta::seconds(seconds)),
        ),
    );
    model
}

fn time_zone_errors(seconds: i64) -> usize {
    let model = model_with_time_zone(seconds);
    let settings = ValidationSettings::default();
    let report = BoundaryConditionValidator.validate(&ValidationContext::new(&model, &settings));
    report
        .all_issues()
        .into_iter()
        .filter(|i| i.severity() == ValidationSeverity::Error && i.message().starts_with("Time zone"))
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Offsets within twelve hours either side of UTC are accepted
    #[test]
    fn offsets_within_limit_accepted(seconds in -LIMIT_SECONDS..=LIMIT_SECONDS) {
        prop_assert_eq!(time_zone_errors(seconds), 0, "offset {} s rejected", seconds);
    }

    // Anything beyond twelve hours is rejected exactly once
    #[test]
    fn offsets_beyond_limit_rejected(excess in 1i64..=12 * 3600, negative in any::<bool>()) {
        let seconds = if negative { -(LIMIT_SECONDS + excess) } else { LIMIT_SECONDS + excess };
        prop_assert_eq!(time_zone_errors(seconds), 1, "offset {} s accepted", seconds);
    }
}

#[test]
fn test_exact_limits() {
    assert_eq!(time_zone_errors(LIMIT_SECONDS), 0);
    assert_eq!(time_zone_errors(LIMIT_SECONDS + 1), 1);
    assert_eq!(time_zone_errors(-LIMIT_SECONDS), 0);
    assert_eq!(time_zone_errors(-LIMIT_SECONDS - 1), 1);
}
