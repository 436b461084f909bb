//! Checks shared by several validators.

use crate::core::report::{FeatureKind, FeatureRef, ValidationIssue};
use crate::model::time::{TimeSeries, TimeWindow};
use indexmap::IndexMap;

/// One error per name used by more than one item. Empty names are skipped.
pub fn duplicate_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    plural: &str,
    kind: FeatureKind,
) -> Vec<ValidationIssue> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names.into_iter().filter(|n| !n.is_empty()) {
        *counts.entry(name).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| {
            ValidationIssue::error(
                FeatureRef::new(kind, name),
                format!("Several {} with the same name '{}' exist.", plural, name),
            )
        })
        .collect()
}

/// One error per item without a name.
pub fn empty_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    singular: &str,
    kind: FeatureKind,
) -> Vec<ValidationIssue> {
    names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(index, _)| {
            ValidationIssue::error(
                FeatureRef::new(kind, format!("#{}", index + 1)),
                format!("A {} without a name exists (item {}).", singular, index + 1),
            )
        })
        .collect()
}

/// Presence and coverage of a time series belonging to a named feature.
///
/// Messages read "`<owner>`: `<what>` time series does not ...".
pub fn series_presence_and_span(
    owner: &str,
    what: &str,
    series: &TimeSeries,
    window: &TimeWindow,
    subject: &FeatureRef,
) -> Option<ValidationIssue> {
    if series.is_empty() {
        Some(ValidationIssue::error(
            subject.clone(),
            format!("{}: {} time series does not contain any values.", owner, what),
        ))
    } else if !window.is_covered_by(series) {
        Some(ValidationIssue::error(
            subject.clone(),
            format!("{}: {} time series does not span the model run interval.", owner, what),
        ))
    } else {
        None
    }
}

/// Join numbers the way messages list them: `-1, 101`.
pub fn join_numbers(values: &[f64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
