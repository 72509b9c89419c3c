//! Jenks natural breaks classification
//!
//! Fisher-Jenks dynamic programming over the sorted values. The result holds
//! `classes + 1` boundaries: the minimum followed by the upper bound of every
//! class.

use std::error::Error;
use std::fmt;

use log::Level;

/// Why breaks could not be computed for a column
#[derive(Debug, Clone, PartialEq)]
pub enum BreaksError {
    /// Fewer than two classes, or more classes than values
    InvalidClassCount { classes: usize, values: usize },
    /// A value is not a number
    NonNumeric(String),
}

impl BreaksError {
    /// Level the failure is reported at
    pub fn level(&self) -> Level {
        match self {
            BreaksError::InvalidClassCount { .. } => Level::Warn,
            BreaksError::NonNumeric(_) => Level::Error,
        }
    }
}

impl fmt::Display for BreaksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreaksError::InvalidClassCount { classes, values } => write!(
                f,
                "cannot split {} values into {} classes (need at least 2 classes and no more classes than values)",
                values, classes
            ),
            BreaksError::NonNumeric(value) => write!(f, "'{}' is not a number", value),
        }
    }
}

impl Error for BreaksError {}

/// Parse raw column values as numbers
pub fn parse_values<S: AsRef<str>>(raw: &[S]) -> Result<Vec<f64>, BreaksError> {
    raw.iter()
        .map(|value| {
            let value = value.as_ref().trim();
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| BreaksError::NonNumeric(value.to_string()))
        })
        .collect()
}

/// Compute natural breaks for `classes` classes
pub fn jenks_breaks(values: &[f64], classes: usize) -> Result<Vec<f64>, BreaksError> {
    let n = values.len();
    if classes < 2 || classes > n {
        return Err(BreaksError::InvalidClassCount { classes, values: n });
    }

    let mut data = values.to_vec();
    data.sort_by(|a, b| a.total_cmp(b));

    // 1-based like the textbook formulation; row 0 and column 0 are unused
    let mut lower_class_limits = vec![vec![0usize; classes + 1]; n + 1];
    let mut variance_combinations = vec![vec![0f64; classes + 1]; n + 1];

    for j in 1..=classes {
        lower_class_limits[1][j] = 1;
        for row in variance_combinations.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut weight = 0.0;
        let mut variance = 0.0;

        for m in 1..=l {
            let lower = l - m + 1;
            let value = data[lower - 1];
            sum_squares += value * value;
            sum += value;
            weight += 1.0;
            variance = sum_squares - (sum * sum) / weight;

            let previous = lower - 1;
            if previous != 0 {
                for j in 2..=classes {
                    let candidate = variance + variance_combinations[previous][j - 1];
                    if variance_combinations[l][j] >= candidate {
                        lower_class_limits[l][j] = lower;
                        variance_combinations[l][j] = candidate;
                    }
                }
            }
        }

        lower_class_limits[l][1] = 1;
        variance_combinations[l][1] = variance;
    }

    let mut breaks = vec![0f64; classes + 1];
    breaks[0] = data[0];
    breaks[classes] = data[n - 1];

    let mut k = n;
    for count in (2..=classes).rev() {
        let lower = lower_class_limits[k][count];
        breaks[count - 1] = data[lower.saturating_sub(2)];
        k = lower.saturating_sub(1);
    }

    Ok(breaks)
}
