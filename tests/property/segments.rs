use hydro_validate::model::discretization::{Discretization, NetworkLocation};
use hydro_validate::model::network::Branch;
use hydro_validate::prelude::*;
use hydro_validate::validation::ComputationalGridValidator;
use proptest::prelude::*;

/// One branch covered by a single segment of `length`.
fn single_segment_model(length: f64) -> HydroModel {
    let mut model = HydroModel::new("segments");
    model.network.branches.push(Branch::new("branch1", "n1", "n2", length));
    model.discretization = Discretization {
        name: "grid".to_string(),
        locations: vec![
            NetworkLocation::new("p1", "branch1", 0.0),
            NetworkLocation::new("p2", "branch1", length),
        ],
    };
    model
}

fn short_segment_warnings(length: f64, min_segment_length: f64) -> usize {
    let model = single_segment_model(length);
    let settings = ValidationSettings::default().with_min_segment_length(min_segment_length);
    ComputationalGridValidator
        .validate(&ValidationContext::new(&model, &settings))
        .warning_count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A segment warns exactly when it is strictly shorter than the threshold
    #[test]
    fn warns_iff_shorter_than_threshold(length in 0.01f64..10.0, min in 0.01f64..10.0) {
        let expected = usize::from(length < min);
        prop_assert_eq!(short_segment_warnings(length, min), expected,
            "length {} with threshold {}", length, min);
    }

    // A segment of exactly the threshold length is accepted
    #[test]
    fn threshold_length_accepted(min in 0.01f64..100.0) {
        prop_assert_eq!(short_segment_warnings(min, min), 0);
    }
}

#[test]
fn test_default_threshold() {
    assert_eq!(short_segment_warnings(0.999, 1.0), 1);
    assert_eq!(short_segment_warnings(1.0, 1.0), 0);
}
