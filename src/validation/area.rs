//! 2D area validation.
//!
//! Thin dams, sources/sinks and fixed weirs are reported directly under the
//! area report; weirs, pumps and gates go into a "Structures (2D)" child.

use crate::core::context::ValidationContext;
use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue, ValidationReport};
use crate::model::area::{
    Area2D, Gate2D, GateOpeningDirection, GateSettings, Pump2D, Structure2D, StructureKind2D, Weir2D, WeirFormula,
};
use crate::model::geometry::{Envelope, Polyline};
use crate::model::time::{TimeDependent, TimeSeries, TimeWindow};
use crate::validation::common::{duplicate_names, empty_names, series_presence_and_span};
use crate::validation::ModelValidator;

/// Validator for 2D area features.
pub struct Area2DValidator;

impl ModelValidator for Area2DValidator {
    fn name(&self) -> &str {
        "2D area"
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let model = ctx.model;
        let area = &model.area;
        let checker = AreaChecker {
            extent: model.active_grid().and_then(|g| g.extent()),
            window: model.time_frame.run_window(),
        };

        let mut issues = name_issues(area);
        for thin_dam in &area.thin_dams {
            issues.extend(checker.snapping("thin dam", &thin_dam.name, FeatureKind::ThinDam, &thin_dam.geometry));
        }
        for source_sink in &area.source_sinks {
            let subject = FeatureRef::new(FeatureKind::SourceSink, &source_sink.name);
            issues.extend(checker.snapping(
                "source/sink",
                &source_sink.name,
                FeatureKind::SourceSink,
                &source_sink.geometry,
            ));
            issues.extend(series_presence_and_span(
                &format!("source/sink '{}'", source_sink.name),
                "discharge",
                &source_sink.discharge,
                &checker.window,
                &subject,
            ));
        }
        for fixed_weir in &area.fixed_weirs {
            let subject = FeatureRef::new(FeatureKind::FixedWeir, &fixed_weir.name);
            issues.extend(checker.snapping(
                "fixed weir",
                &fixed_weir.name,
                FeatureKind::FixedWeir,
                &fixed_weir.geometry,
            ));
            for point in &fixed_weir.points {
                if point.sill_depths().iter().any(|depth| *depth <= 0.0) {
                    issues.push(ValidationIssue::warning(
                        subject.clone(),
                        format!(
                            "fixed weir '{}' has unphysical sill depths, parts will be ignored by the computational core",
                            fixed_weir.name
                        ),
                    ));
                }
            }
        }

        let structures = area
            .structures
            .iter()
            .flat_map(|s| checker.structure(s))
            .collect();

        ValidationReport::with_non_empty_children(
            self.name(),
            issues,
            vec![ValidationReport::leaf("Structures (2D)", structures)],
        )
    }
}

fn name_issues(area: &Area2D) -> Vec<ValidationIssue> {
    let of_kind = |label: &'static str| {
        area.structures
            .iter()
            .filter(move |s| s.kind.label() == label)
            .map(|s| s.name.as_str())
    };
    let thin_dams = || area.thin_dams.iter().map(|t| t.name.as_str());
    let source_sinks = || area.source_sinks.iter().map(|s| s.name.as_str());
    let fixed_weirs = || area.fixed_weirs.iter().map(|f| f.name.as_str());
    let embankments = || area.embankments.iter().map(|e| e.name.as_str());

    let mut issues = Vec::new();
    issues.extend(duplicate_names(embankments(), "embankments (2D)", FeatureKind::Embankment));
    issues.extend(duplicate_names(fixed_weirs(), "fixed weirs (2D)", FeatureKind::FixedWeir));
    issues.extend(duplicate_names(of_kind("gate"), "gates (2D)", FeatureKind::Gate));
    issues.extend(duplicate_names(of_kind("pump"), "pumps (2D)", FeatureKind::Pump));
    issues.extend(duplicate_names(source_sinks(), "sources/sinks (2D)", FeatureKind::SourceSink));
    issues.extend(duplicate_names(thin_dams(), "thin dams (2D)", FeatureKind::ThinDam));
    issues.extend(duplicate_names(of_kind("weir"), "weirs (2D)", FeatureKind::Weir));

    issues.extend(empty_names(embankments(), "embankment (2D)", FeatureKind::Embankment));
    issues.extend(empty_names(fixed_weirs(), "fixed weir (2D)", FeatureKind::FixedWeir));
    issues.extend(empty_names(of_kind("gate"), "gate (2D)", FeatureKind::Gate));
    issues.extend(empty_names(of_kind("pump"), "pump (2D)", FeatureKind::Pump));
    issues.extend(empty_names(source_sinks(), "source/sink (2D)", FeatureKind::SourceSink));
    issues.extend(empty_names(thin_dams(), "thin dam (2D)", FeatureKind::ThinDam));
    issues.extend(empty_names(of_kind("weir"), "weir (2D)", FeatureKind::Weir));
    issues
}

// ============================================================================
// Feature checks
// ============================================================================

struct AreaChecker {
    /// Extent of the active grid; `None` disables snapping checks.
    extent: Option<Envelope>,
    window: TimeWindow,
}

impl AreaChecker {
    fn snapping(&self, label: &str, name: &str, kind: FeatureKind, geometry: &Polyline) -> Option<ValidationIssue> {
        let extent = self.extent.as_ref()?;
        let within = geometry.envelope().is_some_and(|e| e.intersects(extent));
        (!within).then(|| {
            ValidationIssue::warning(
                FeatureRef::new(kind, name),
                format!("{} '{}' not within grid extent", label, name),
            )
        })
    }

    fn structure(&self, structure: &Structure2D) -> Vec<ValidationIssue> {
        let (kind, label) = match &structure.kind {
            StructureKind2D::Weir(_) => (FeatureKind::Weir, "weir"),
            StructureKind2D::Pump(_) => (FeatureKind::Pump, "pump"),
            StructureKind2D::Gate(_) => (FeatureKind::Gate, "gate"),
        };
        let mut issues = Vec::new();
        issues.extend(self.snapping(label, &structure.name, kind, &structure.geometry));

        let check = StructureCheck {
            owner: format!("{} '{}'", label, structure.name),
            name: &structure.name,
            subject: FeatureRef::new(kind, &structure.name),
            window: &self.window,
        };
        match &structure.kind {
            StructureKind2D::Weir(weir) => issues.extend(check.weir(weir)),
            StructureKind2D::Pump(pump) => issues.extend(check.pump(pump)),
            StructureKind2D::Gate(gate) => issues.extend(check.gate(gate)),
        }
        issues
    }
}

/// Checks on one 2D structure; messages are prefixed with its owner label.
struct StructureCheck<'a> {
    owner: String,
    name: &'a str,
    subject: FeatureRef,
    window: &'a TimeWindow,
}

impl StructureCheck<'_> {
    fn error(&self, message: &str) -> ValidationIssue {
        ValidationIssue::error(self.subject.clone(), format!("{}: {}", self.owner, message))
    }

    fn series(&self, what: &str, series: &TimeSeries) -> Option<ValidationIssue> {
        series_presence_and_span(&self.owner, what, series, self.window, &self.subject)
    }

    /// Time series coverage when given as series; `None` otherwise.
    fn time_dependent(&self, what: &str, value: &TimeDependent) -> Option<ValidationIssue> {
        value.as_series().and_then(|series| self.series(what, series))
    }

    /// A non-negative quantity given as constant or as series.
    fn non_negative(&self, what: &str, value: &TimeDependent, constant_message: &str) -> Vec<ValidationIssue> {
        match value {
            TimeDependent::Series(series) => {
                let mut issues = Vec::new();
                if series.has_negative_values() {
                    issues.push(self.error(&format!(
                        "{} time series values must be greater than or equal to 0.",
                        what
                    )));
                }
                issues.extend(self.series(what, series));
                issues
            }
            TimeDependent::Constant(v) if *v < 0.0 => vec![self.error(constant_message)],
            TimeDependent::Constant(_) => Vec::new(),
        }
    }

    fn crest_width(&self, property: &str, width: Option<f64>, formula: &WeirFormula) -> Option<ValidationIssue> {
        match width {
            Some(w) if !w.is_nan() => (w <= 0.0).then(|| {
                ValidationIssue::error(
                    self.subject.clone(),
                    format!(
                        "{} for '{}' structure type '{}' must be greater than 0.",
                        property,
                        self.name,
                        formula.name()
                    ),
                )
            }),
            _ => Some(ValidationIssue::info(
                self.subject.clone(),
                format!(
                    "{} for '{}' structure type '{}' will be calculated by the computational core.",
                    property,
                    self.name,
                    formula.name()
                ),
            )),
        }
    }

    fn weir(&self, weir: &Weir2D) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        issues.extend(self.time_dependent("crest level", &weir.crest_level));
        issues.extend(self.crest_width("Crest Width", weir.crest_width, &weir.formula));

        match &weir.formula {
            WeirFormula::Simple { lateral_contraction } => {
                if weir.correction_coefficient < 0.0 {
                    issues.push(self.error("correction coefficient must be greater than or equal to zero."));
                }
                if *lateral_contraction < 0.0 {
                    issues.push(self.error("lateral contraction coefficient must be greater than or equal to zero."));
                }
            }
            WeirFormula::Gated { gate } => issues.extend(self.gated(gate)),
            WeirFormula::General {
                gate,
                horizontal_direction,
                upstream1_width,
                upstream2_width,
                downstream1_width,
                downstream2_width,
            } => {
                issues.extend(self.gated(gate));
                if *horizontal_direction != GateOpeningDirection::Symmetric {
                    issues.push(
                        self.error("only symmetric gate opening horizontal direction is supported for general structures."),
                    );
                }
                for (property, width) in [
                    ("Upstream 2 Width", upstream2_width),
                    ("Upstream 1 Width", upstream1_width),
                    ("Downstream 1 Width", downstream1_width),
                    ("Downstream 2 Width", downstream2_width),
                ] {
                    issues.extend(self.crest_width(property, *width, &weir.formula));
                }
            }
        }
        issues
    }

    fn gated(&self, gate: &GateSettings) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if gate.gate_height < 0.0 {
            issues.push(self.error("gate height must be greater than or equal to 0."));
        }
        issues.extend(self.non_negative(
            "gate opening width",
            &gate.opening_width,
            "gate opening width must be greater than or equal to 0.",
        ));
        issues.extend(self.time_dependent("gate lower edge level", &gate.lower_edge_level));
        issues
    }

    fn pump(&self, pump: &Pump2D) -> Vec<ValidationIssue> {
        let mut issues = self.non_negative(
            "capacity",
            &pump.capacity,
            "Capacity must be greater than or equal to 0.",
        );
        if pump.control_direction.controls_delivery() && pump.delivery_start > pump.delivery_stop {
            issues.push(self.error("Delivery start level must be less than or equal to delivery stop level."));
        }
        if pump.control_direction.controls_suction() && pump.suction_start >= pump.suction_stop {
            issues.push(self.error("Suction start level must be less than suction stop level."));
        }
        issues
    }

    fn gate(&self, gate: &Gate2D) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if gate.door_height < 0.0 {
            issues.push(self.error("door height must be greater than or equal to 0."));
        }
        issues.extend(self.time_dependent("sill level", &gate.sill_level));
        issues.extend(self.non_negative(
            "opening width",
            &gate.opening_width,
            "Opening width must be greater than or equal to 0.",
        ));
        issues.extend(self.time_dependent("lower edge level", &gate.lower_edge_level));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::ValidationSeverity;
    use crate::model::area::{FixedWeir, FixedWeirPoint, PumpControlDirection, SourceSink, ThinDam};
    use crate::model::discretization::Grid2D;
    use crate::model::HydroModel;
    use crate::validation::testing::{at, messages, model, run};

    fn inside() -> Polyline {
        Polyline::from_coords(&[(1.0, 1.0), (2.0, 2.0)])
    }

    fn outside() -> Polyline {
        Polyline::from_coords(&[(50.0, 50.0), (60.0, 60.0)])
    }

    fn full_series(value: f64) -> TimeSeries {
        TimeSeries::constant(vec![at(0), at(24)], value)
    }

    fn weir(formula: WeirFormula) -> Weir2D {
        Weir2D {
            crest_width: Some(10.0),
            formula,
            ..Default::default()
        }
    }

    fn model_with(structures: Vec<Structure2D>) -> HydroModel {
        let mut model = model();
        model.area.structures = structures;
        model
    }

    fn structure_messages(report: &ValidationReport) -> Vec<String> {
        report
            .sub_report("Structures (2D)")
            .map(messages)
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_area() {
        assert!(run(&Area2DValidator, &model()).is_empty());
    }

    #[test]
    fn test_snapping_only_with_grid() {
        let mut model = model();
        model.area.thin_dams = vec![
            ThinDam {
                name: "td1".to_string(),
                geometry: inside(),
            },
            ThinDam {
                name: "td2".to_string(),
                geometry: outside(),
            },
        ];
        assert!(run(&Area2DValidator, &model).is_empty());

        model.grid = Some(Grid2D::regular(10, 10, 1.0));
        let report = run(&Area2DValidator, &model);
        assert_eq!(messages(&report), vec!["thin dam 'td2' not within grid extent"]);
        assert_eq!(report.severity(), Some(ValidationSeverity::Warning));
    }

    #[test]
    fn test_source_sink_discharge() {
        let mut model = model();
        model.area.source_sinks = vec![
            SourceSink {
                name: "ss1".to_string(),
                geometry: inside(),
                discharge: TimeSeries::default(),
            },
            SourceSink {
                name: "ss2".to_string(),
                geometry: inside(),
                discharge: TimeSeries::constant(vec![at(1), at(24)], 1.0),
            },
        ];
        let report = run(&Area2DValidator, &model);
        assert_eq!(
            messages(&report),
            vec![
                "source/sink 'ss1': discharge time series does not contain any values.",
                "source/sink 'ss2': discharge time series does not span the model run interval.",
            ]
        );
    }

    #[test]
    fn test_fixed_weir_sill_depths() {
        let mut model = model();
        let point = |crest, left, right| FixedWeirPoint {
            crest_level: crest,
            ground_height_left: left,
            ground_height_right: right,
        };
        model.area.fixed_weirs = vec![FixedWeir {
            name: "fw1".to_string(),
            geometry: inside(),
            points: vec![point(2.0, 1.0, 1.0), point(2.0, 2.0, 1.0), point(1.0, 0.0, 3.0)],
        }];
        let report = run(&Area2DValidator, &model);
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_simple_weir() {
        let mut bad = weir(WeirFormula::Simple {
            lateral_contraction: -1.0,
        });
        bad.correction_coefficient = -0.5;
        bad.crest_level = TimeDependent::Series(TimeSeries::default());
        let report = run(
            &Area2DValidator,
            &model_with(vec![Structure2D::new("w1", inside(), StructureKind2D::Weir(bad))]),
        );
        assert_eq!(
            structure_messages(&report),
            vec![
                "weir 'w1': crest level time series does not contain any values.",
                "weir 'w1': correction coefficient must be greater than or equal to zero.",
                "weir 'w1': lateral contraction coefficient must be greater than or equal to zero.",
            ]
        );
    }

    #[test]
    fn test_crest_width() {
        let mut computed = weir(WeirFormula::default());
        computed.crest_width = None;
        let mut zero = weir(WeirFormula::default());
        zero.crest_width = Some(0.0);
        let report = run(
            &Area2DValidator,
            &model_with(vec![
                Structure2D::new("w1", inside(), StructureKind2D::Weir(computed)),
                Structure2D::new("w2", inside(), StructureKind2D::Weir(zero)),
            ]),
        );
        assert_eq!(
            structure_messages(&report),
            vec![
                "Crest Width for 'w1' structure type 'Simple weir' will be calculated by the computational core.",
                "Crest Width for 'w2' structure type 'Simple weir' must be greater than 0.",
            ]
        );
        assert_eq!(report.info_count(), 1);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_general_structure() {
        let gate = GateSettings {
            gate_height: -1.0,
            opening_width: TimeDependent::Series(TimeSeries::new(vec![at(0), at(24)], vec![1.0, -1.0])),
            lower_edge_level: TimeDependent::Constant(2.0),
        };
        let formula = WeirFormula::General {
            gate,
            horizontal_direction: GateOpeningDirection::FromLeft,
            upstream1_width: Some(5.0),
            upstream2_width: Some(5.0),
            downstream1_width: Some(-1.0),
            downstream2_width: None,
        };
        let report = run(
            &Area2DValidator,
            &model_with(vec![Structure2D::new("gs", inside(), StructureKind2D::Weir(weir(formula)))]),
        );
        assert_eq!(
            structure_messages(&report),
            vec![
                "weir 'gs': gate height must be greater than or equal to 0.",
                "weir 'gs': gate opening width time series values must be greater than or equal to 0.",
                "weir 'gs': only symmetric gate opening horizontal direction is supported for general structures.",
                "Downstream 1 Width for 'gs' structure type 'General structure' must be greater than 0.",
                "Downstream 2 Width for 'gs' structure type 'General structure' will be calculated by the computational core.",
            ]
        );
    }

    #[test]
    fn test_pump() {
        let pump = Pump2D {
            capacity: TimeDependent::Constant(-1.0),
            control_direction: PumpControlDirection::Both,
            suction_start: 2.0,
            suction_stop: 1.0,
            delivery_start: 3.0,
            delivery_stop: 1.0,
        };
        let report = run(
            &Area2DValidator,
            &model_with(vec![Structure2D::new("p1", inside(), StructureKind2D::Pump(pump))]),
        );
        assert_eq!(
            structure_messages(&report),
            vec![
                "pump 'p1': Capacity must be greater than or equal to 0.",
                "pump 'p1': Delivery start level must be less than or equal to delivery stop level.",
                "pump 'p1': Suction start level must be less than suction stop level.",
            ]
        );
    }

    #[test]
    fn test_pump_capacity_series() {
        let pump = Pump2D {
            capacity: TimeDependent::Series(full_series(2.0)),
            control_direction: PumpControlDirection::Delivery,
            suction_start: 5.0,
            suction_stop: 1.0,
            delivery_start: 1.0,
            delivery_stop: 1.0,
        };
        let report = run(
            &Area2DValidator,
            &model_with(vec![Structure2D::new("p1", inside(), StructureKind2D::Pump(pump))]),
        );
        assert!(report.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn test_gate() {
        let gate = Gate2D {
            door_height: -2.0,
            sill_level: TimeDependent::Series(TimeSeries::constant(vec![at(0)], 1.0)),
            opening_width: TimeDependent::Constant(-3.0),
            lower_edge_level: TimeDependent::Series(full_series(1.0)),
        };
        let report = run(
            &Area2DValidator,
            &model_with(vec![Structure2D::new("g1", inside(), StructureKind2D::Gate(gate))]),
        );
        assert_eq!(
            structure_messages(&report),
            vec![
                "gate 'g1': door height must be greater than or equal to 0.",
                "gate 'g1': sill level time series does not span the model run interval.",
                "gate 'g1': Opening width must be greater than or equal to 0.",
            ]
        );
    }

    #[test]
    fn test_duplicate_names_per_kind() {
        let pump = || StructureKind2D::Pump(Pump2D {
            suction_stop: 1.0,
            ..Default::default()
        });
        let gate = StructureKind2D::Gate(Gate2D::default());
        let report = run(
            &Area2DValidator,
            &model_with(vec![
                Structure2D::new("s", inside(), pump()),
                Structure2D::new("s", inside(), pump()),
                Structure2D::new("s", inside(), gate),
            ]),
        );
        assert_eq!(
            messages(&report),
            vec!["Several pumps (2D) with the same name 's' exist."]
        );
    }
}
