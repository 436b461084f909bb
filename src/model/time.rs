//! Time frame, time series and output interval types.

use chrono::{NaiveDateTime, SubsecRound, TimeDelta};
use serde::{Deserialize, Serialize};

/// Serde adapter storing a [`TimeDelta`] as (fractional) seconds.
pub mod serde_seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(delta.num_milliseconds() as f64 / 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(serde::de::Error::custom("duration must be finite"));
        }
        let millis = (seconds * 1000.0).round();
        if millis.abs() >= i64::MAX as f64 {
            return Err(serde::de::Error::custom("duration out of range"));
        }
        TimeDelta::try_milliseconds(millis as i64)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}

// ============================================================================
// Time frame
// ============================================================================

/// Run interval and time stepping of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeFrame {
    pub start_time: NaiveDateTime,
    pub stop_time: NaiveDateTime,
    pub reference_time: NaiveDateTime,
    /// User time step.
    #[serde(with = "serde_seconds")]
    pub time_step: TimeDelta,
    /// Maximum computational time step.
    #[serde(with = "serde_seconds")]
    pub max_time_step: TimeDelta,
    /// Offset of model times relative to UTC.
    #[serde(with = "serde_seconds")]
    pub time_zone: TimeDelta,
}

impl Default for TimeFrame {
    fn default() -> Self {
        let start = NaiveDateTime::default();
        Self {
            start_time: start,
            stop_time: start + TimeDelta::days(1),
            reference_time: start,
            time_step: TimeDelta::minutes(5),
            max_time_step: TimeDelta::seconds(30),
            time_zone: TimeDelta::zero(),
        }
    }
}

impl TimeFrame {
    /// Create a frame running from `start` to `stop`.
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Self {
        Self {
            start_time: start,
            stop_time: stop,
            reference_time: start,
            ..Default::default()
        }
    }

    /// The model run interval.
    pub fn run_window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.stop_time)
    }

    /// The run interval expressed in data given in `time_zone`.
    ///
    /// `None` when the shifted interval is not representable.
    pub fn run_window_in(&self, time_zone: TimeDelta) -> Option<TimeWindow> {
        let delta = time_zone.checked_sub(&self.time_zone)?;
        self.run_window().shifted(delta)
    }
}

/// Closed interval of absolute times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Self {
        Self { start, stop }
    }

    /// Move both ends by `delta`, `None` on overflow.
    pub fn shifted(self, delta: TimeDelta) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add_signed(delta)?,
            stop: self.stop.checked_add_signed(delta)?,
        })
    }

    /// Whether `series` has values at or before `start` and at or after `stop`.
    ///
    /// Times are compared at millisecond resolution.
    pub fn is_covered_by(&self, series: &TimeSeries) -> bool {
        match (series.first_time(), series.last_time()) {
            (Some(first), Some(last)) => {
                at_millis(first) <= at_millis(self.start) && at_millis(last) >= at_millis(self.stop)
            }
            _ => false,
        }
    }
}

/// Truncate a time to whole milliseconds.
pub fn at_millis(time: NaiveDateTime) -> NaiveDateTime {
    time.trunc_subsecs(3)
}

/// Whether `interval` is a whole multiple of `step` at one second resolution.
pub fn is_multiple_of(interval: TimeDelta, step: TimeDelta) -> bool {
    is_multiple_at(interval, step, TimeDelta::seconds(1))
}

/// Whether `interval` is a whole multiple of `step`, both truncated to
/// `resolution`.
pub fn is_multiple_at(interval: TimeDelta, step: TimeDelta, resolution: TimeDelta) -> bool {
    let unit = resolution.num_milliseconds().max(1);
    let step = step.num_milliseconds() / unit;
    if step <= 0 {
        return false;
    }
    (interval.num_milliseconds() / unit) % step == 0
}

// ============================================================================
// Time series
// ============================================================================

/// How a series is continued outside its defined times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    #[default]
    None,
    Constant,
    Linear,
    Periodic,
}

/// One value column of a time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesComponent {
    pub name: String,
    pub values: Vec<f64>,
}

/// A function of time with one or more value components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeries {
    pub times: Vec<NaiveDateTime>,
    pub components: Vec<SeriesComponent>,
    pub extrapolation: Extrapolation,
}

impl TimeSeries {
    /// A single-component series.
    pub fn new(times: Vec<NaiveDateTime>, values: Vec<f64>) -> Self {
        Self {
            times,
            components: vec![SeriesComponent {
                name: "value".to_string(),
                values,
            }],
            extrapolation: Extrapolation::None,
        }
    }

    /// A single-component series holding `value` at every time.
    pub fn constant(times: Vec<NaiveDateTime>, value: f64) -> Self {
        let values = vec![value; times.len()];
        Self::new(times, values)
    }

    /// Add another value component.
    pub fn with_component(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.components.push(SeriesComponent {
            name: name.into(),
            values,
        });
        self
    }

    /// Set the extrapolation policy.
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Whether the series has no time arguments.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Earliest time.
    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.times.iter().min().copied()
    }

    /// Latest time.
    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.times.iter().max().copied()
    }

    /// Smallest value per component, skipping empty components.
    pub fn component_minima(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.components.iter().filter_map(|component| {
            component
                .values
                .iter()
                .copied()
                .reduce(f64::min)
                .map(|min| (component.name.as_str(), min))
        })
    }

    /// Whether any component holds a negative value.
    pub fn has_negative_values(&self) -> bool {
        self.component_minima().any(|(_, min)| min < 0.0)
    }
}

/// A quantity given either as a constant or as a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeDependent {
    Constant(f64),
    Series(TimeSeries),
}

impl Default for TimeDependent {
    fn default() -> Self {
        TimeDependent::Constant(0.0)
    }
}

impl TimeDependent {
    pub fn as_series(&self) -> Option<&TimeSeries> {
        match self {
            TimeDependent::Series(series) => Some(series),
            TimeDependent::Constant(_) => None,
        }
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self {
            TimeDependent::Constant(value) => Some(*value),
            TimeDependent::Series(_) => None,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// One output file stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputStream {
    pub enabled: bool,
    #[serde(with = "serde_seconds")]
    pub interval: TimeDelta,
}

impl Default for OutputStream {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: TimeDelta::hours(1),
        }
    }
}

impl OutputStream {
    pub fn every(interval: TimeDelta) -> Self {
        Self {
            enabled: true,
            interval,
        }
    }
}

/// Output streams of the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub his: OutputStream,
    pub map: OutputStream,
    pub class_map: OutputStream,
    pub restart: OutputStream,
    pub waq: OutputStream,
}

impl OutputSettings {
    /// Streams with their display names, in a fixed order.
    pub fn streams(&self) -> [(&'static str, &OutputStream); 5] {
        [
            ("His", &self.his),
            ("Map", &self.map),
            ("Class map", &self.class_map),
            ("Restart", &self.restart),
            ("Water quality", &self.waq),
        ]
    }
}
