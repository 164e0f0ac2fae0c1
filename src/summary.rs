//! Min/max/mean/trend over a measurement series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a series, comparing its last present value to its first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Upward,
    /// Also returned when the first and last values are equal.
    Downward,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Upward => write!(f, "upward"),
            Trend::Downward => write!(f, "downward"),
        }
    }
}

/// Result of [`summarize`]. Timestamps are copied verbatim from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min_value: f64,
    /// Timestamp of the first occurrence of `min_value`.
    pub min_at: String,
    pub max_value: f64,
    /// Timestamp of the first occurrence of `max_value`.
    pub max_at: String,
    pub mean_value: f64,
    pub trend: Trend,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Min: {} ({})", self.min_value, self.min_at)?;
        writeln!(f, "Max: {} ({})", self.max_value, self.max_at)?;
        writeln!(f, "Mean: {}", self.mean_value)?;
        write!(f, "Trend: {}", self.trend)
    }
}

/// Reduces `(timestamp, value)` pairs to a [`Summary`].
///
/// Pairs without a value (or with `NaN`) are skipped. Returns `None` when nothing is left.
/// Ties on min/max keep the earliest pair; equal first and last values give
/// [`Trend::Downward`].
///
/// ```
/// use gios_air::{summarize, Trend};
///
/// let series = [("2020-01-01", Some(5.0)), ("2020-01-02", None), ("2020-01-03", Some(20.0))];
/// let summary = summarize(&series).unwrap();
/// assert_eq!(summary.min_at, "2020-01-01");
/// assert_eq!(summary.mean_value, 12.5);
/// assert_eq!(summary.trend, Trend::Upward);
/// ```
pub fn summarize<T: AsRef<str>>(series: &[(T, Option<f64>)]) -> Option<Summary> {
    let mut present = series.iter().filter_map(|(at, value)| {
        let value = (*value).filter(|v| !v.is_nan())?;
        Some((AsRef::<str>::as_ref(at), value))
    });

    let (first_at, first) = present.next()?;
    let (mut min_value, mut min_at) = (first, first_at);
    let (mut max_value, mut max_at) = (first, first_at);
    let mut sum = first;
    let mut count = 1usize;
    let mut last = first;

    for (at, value) in present {
        // Strict comparisons keep the first occurrence.
        if value < min_value {
            min_value = value;
            min_at = at;
        }
        if value > max_value {
            max_value = value;
            max_at = at;
        }
        sum += value;
        count += 1;
        last = value;
    }

    // Rounding in the running sum must not push the mean outside [min, max].
    let mean_value = (sum / count as f64).clamp(min_value, max_value);
    let trend = if last > first {
        Trend::Upward
    } else {
        Trend::Downward
    };

    Some(Summary {
        min_value,
        min_at: min_at.to_string(),
        max_value,
        max_at: max_at.to_string(),
        mean_value,
        trend,
    })
}
