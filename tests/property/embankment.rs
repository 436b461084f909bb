use hydro_validate::model::area::Embankment;
use hydro_validate::model::geometry::{Point, Polyline};
use hydro_validate::prelude::*;
use hydro_validate::validation::EmbankmentValidator;
use proptest::prelude::*;
use std::f64::consts::TAU;

/// Open polyline through points on a circle, in increasing angle order.
fn convex_arc(radius: f64, steps: &[f64]) -> Polyline {
    let total: f64 = steps.iter().sum();
    let mut angle = 0.0;
    let mut points = Vec::with_capacity(steps.len() + 1);
    points.push(Point::new(radius, 0.0));
    for step in steps {
        angle += step / total * TAU * 0.9;
        points.push(Point::new(radius * angle.cos(), radius * angle.sin()));
    }
    Polyline::new(points)
}

fn self_intersection_errors(geometry: Polyline) -> usize {
    let mut model = HydroModel::new("embankments");
    model.area.embankments.push(Embankment::new("dike", geometry));
    let settings = ValidationSettings::default();
    EmbankmentValidator
        .validate(&ValidationContext::new(&model, &settings))
        .error_count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Points on a circle visited in angle order never cross themselves
    #[test]
    fn convex_arc_is_simple(
        radius in 1.0f64..1000.0,
        steps in prop::collection::vec(0.1f64..1.0, 2..12),
    ) {
        prop_assert_eq!(self_intersection_errors(convex_arc(radius, &steps)), 0);
    }

    // A bow tie always crosses itself, wherever it sits and however large
    #[test]
    fn bow_tie_intersects(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        width in 0.5f64..100.0,
        height in 0.5f64..100.0,
    ) {
        let bow_tie = Polyline::from_coords(&[
            (x, y),
            (x + width, y + height),
            (x + width, y),
            (x, y + height),
        ]);
        prop_assert_eq!(self_intersection_errors(bow_tie), 1);
    }
}
