use hydro_validate::model::discretization::{Discretization, NetworkLocation};
use hydro_validate::model::network::{Branch, BranchStructure};
use hydro_validate::prelude::*;
use proptest::prelude::*;

/// A network whose branches carry a structure and a sparse grid, so most
/// validators have something to report.
fn model(teta0: f64, lengths: &[f64], chainages: &[f64]) -> HydroModel {
    let mut model = HydroModel::new("repeat");
    model.parameters.teta0 = teta0;
    let mut locations = Vec::new();
    for (i, (length, chainage)) in lengths.iter().zip(chainages).enumerate() {
        let name = format!("branch{}", i + 1);
        model.network.branches.push(
            Branch::new(&name, format!("n{}", i), format!("n{}", i + 1), *length)
                .with_structure(BranchStructure::new(format!("weir{}", i + 1), *chainage)),
        );
        locations.push(NetworkLocation::new(format!("{}_start", name), &name, 0.0));
        locations.push(NetworkLocation::new(format!("{}_mid", name), &name, length / 2.0));
    }
    model.discretization = Discretization {
        name: "grid".to_string(),
        locations,
    };
    model
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Two passes over an unchanged snapshot give identical report trees
    #[test]
    fn repeated_validation_is_identical(
        teta0 in 0.0f64..2.0,
        lengths in prop::collection::vec(0.5f64..500.0, 1..6),
        chainages in prop::collection::vec(-10.0f64..600.0, 6),
    ) {
        let model = model(teta0, &lengths, &chainages);
        let pipeline = ValidationPipeline::default_pipeline();
        let settings = ValidationSettings::default();

        let first = pipeline.validate(Some(&model), &settings).unwrap();
        let second = pipeline.validate(Some(&model), &settings).unwrap();
        prop_assert_eq!(&first, &second);

        let parallel = pipeline
            .validate(Some(&model), &settings.clone().with_parallel(true))
            .unwrap();
        prop_assert_eq!(&first, &parallel);
    }
}
