use hydro_validate::model::boundary::{BoundaryConditionSet, BoundaryFeature};
use hydro_validate::model::network::Branch;
use hydro_validate::model::roughness::{ChainageValue, ChannelFriction, FrictionFunction, FrictionSpecification};
use hydro_validate::prelude::*;
use std::io::Write;

/// Helper: run the default pipeline with default settings.
fn validate(model: &HydroModel) -> ValidationReport {
    ValidationPipeline::default_pipeline()
        .validate(Some(model), &ValidationSettings::default())
        .expect("validation should start")
}

/// Helper: messages of a report subtree.
fn messages(report: &ValidationReport) -> Vec<&str> {
    report.all_issues().into_iter().map(ValidationIssue::message).collect()
}

const CLEAN_MODEL: &str = r#"{
  "name": "rhine",
  "network": {
    "coordinate_system": { "name": "Amersfoort / RD New", "geographic": false },
    "nodes": [{ "name": "n1" }, { "name": "n2" }],
    "branches": [
      {
        "name": "b1",
        "source": "n1",
        "target": "n2",
        "length": 100.0,
        "cross_sections": [{ "name": "cs1", "chainage": 50.0 }]
      }
    ]
  },
  "discretization": {
    "name": "grid",
    "locations": [
      { "name": "p1", "branch": "b1", "chainage": 0.0 },
      { "name": "p2", "branch": "b1", "chainage": 50.0 },
      { "name": "p3", "branch": "b1", "chainage": 100.0 }
    ]
  },
  "time_frame": {
    "start_time": "2000-01-01T00:00:00",
    "stop_time": "2000-01-02T00:00:00",
    "reference_time": "2000-01-01T00:00:00",
    "time_step": 300.0,
    "max_time_step": 30.0,
    "time_zone": 0.0
  }
}"#;

// ─── Sediment ───────────────────────────────────────────────────────────────

#[test]
fn test_morphology_without_fractions() {
    let mut model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    model.sediment.morphology_active = true;

    let report = validate(&model);
    let sediment = report.sub_report("Sediment").expect("sediment runs with morphology");
    assert_eq!(sediment.error_count(), 1);
    assert_eq!(sediment.issue_count(), 2);
    assert_eq!(
        messages(sediment),
        vec![
            "At least one sediment fraction is required.",
            "Morphology is a beta functionality; results may change in future releases.",
        ]
    );
}

// ─── Roughness ──────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_constant_chainage() {
    let mut model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    model.network.branches.push(Branch::new("c1", "n2", "n3", 20.0));
    let values = [5.0, 5.0]
        .into_iter()
        .map(|chainage| ChainageValue { chainage, value: 45.0 })
        .collect();
    model.roughness.push(ChannelFriction::new(
        "c1",
        FrictionSpecification::Spatial {
            function: FrictionFunction::Constant { values },
        },
    ));

    let report = validate(&model);
    let roughness = report.sub_report("Roughness").unwrap();
    assert_eq!(
        messages(roughness),
        vec!["One or more 'Constant' values have a duplicate 'Chainage'"]
    );
    assert_eq!(roughness.error_count(), 1);
}

// ─── Boundary conditions ────────────────────────────────────────────────────

#[test]
fn test_empty_boundary_set() {
    let mut model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    model
        .boundary_conditions
        .push(BoundaryConditionSet::new(BoundaryFeature::new("sea")));

    let report = validate(&model);
    let boundaries = report.sub_report("Boundary conditions").unwrap();
    assert_eq!(boundaries.issue_count(), 1);
    assert_eq!(boundaries.error_count(), 1);
}

// ─── Loading from disk ──────────────────────────────────────────────────────

#[test]
fn test_clean_model_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CLEAN_MODEL.as_bytes()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let model = HydroModel::from_json(&text).unwrap();
    let report = validate(&model);

    assert_eq!(report.name(), "rhine");
    assert!(report.is_empty(), "{:?}", messages(&report));
    assert_eq!(report.severity(), None);
}

#[test]
fn test_missing_end_point_references_target_node() {
    let mut model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    model.discretization.locations.pop();

    let report = validate(&model);
    let grid = report.sub_report("Computational grid").unwrap();
    let errors: Vec<_> = grid
        .all_issues()
        .into_iter()
        .filter(|i| i.severity() == ValidationSeverity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subject(), &FeatureRef::new(FeatureKind::Node, "n2"));
}

#[test]
fn test_settings_file_overrides_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("validation.toml");
    std::fs::write(&path, "min_segment_length = 60.0\nparallel = true\n").unwrap();

    let settings = ValidationSettings::load(&path).unwrap();
    let model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    let report = ValidationPipeline::default_pipeline()
        .validate(Some(&model), &settings)
        .unwrap();

    assert!(!report.has_errors());
    assert_eq!(report.warning_count(), 2);
}

#[test]
fn test_invalid_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("validation.toml");
    std::fs::write(&path, "min_segment_length = -1.0\n").unwrap();

    let error = ValidationSettings::load(&path).unwrap_err();
    assert!(matches!(error, HydroError::InvalidSettings { .. }));
}

#[test]
fn test_report_serializes_to_json() {
    let mut model = HydroModel::from_json(CLEAN_MODEL).unwrap();
    model.parameters.teta0 = 1.5;

    let report = validate(&model);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "rhine");
    assert_eq!(json["sub_reports"][0]["name"], "Model definition");
    assert_eq!(json["sub_reports"][0]["issues"][0]["severity"], "Error");

    let back: ValidationReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
