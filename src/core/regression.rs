//! Pearson correlation and ordinary least squares over (x, y) samples

use serde::{Deserialize, Serialize};

/// A point on the fitted line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

/// Correlation coefficient and fitted line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionStats {
    /// Pearson's r, forced to 0 when undefined
    pub r: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Line endpoints at the observed min and max x; empty for no samples
    pub line_data: Vec<LinePoint>,
}

impl RegressionStats {
    fn empty() -> Self {
        Self {
            r: 0.0,
            slope: 0.0,
            intercept: 0.0,
            line_data: Vec::new(),
        }
    }

    /// Evaluate the fitted line
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit r and the OLS line to a set of samples
pub fn regress(samples: &[(f64, f64)]) -> RegressionStats {
    if samples.is_empty() {
        return RegressionStats::empty();
    }

    let n = samples.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;

    for &(x, y) in samples {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }

    let cov = n * sum_xy - sum_x * sum_y;
    let var_x = without_residue(n * sum_x2 - sum_x * sum_x, n, sum_x2);
    let var_y = without_residue(n * sum_y2 - sum_y * sum_y, n, sum_y2);

    let denominator = (var_x * var_y).sqrt();
    let r = if denominator == 0.0 || denominator.is_nan() {
        0.0
    } else {
        cov / denominator
    };

    // Vertical x spread has no least-squares slope; fall back to the mean.
    // A flat y series is that same flat line.
    let (slope, intercept) = if var_x == 0.0 || var_y == 0.0 {
        (0.0, sum_y / n)
    } else {
        let slope = cov / var_x;
        (slope, (sum_y - slope * sum_x) / n)
    };

    let line_data = vec![
        LinePoint {
            x: min_x,
            y: slope * min_x + intercept,
        },
        LinePoint {
            x: max_x,
            y: slope * max_x + intercept,
        },
    ];

    RegressionStats {
        r,
        slope,
        intercept,
        line_data,
    }
}

/// Raw-sum variance of a constant series is rounding noise, not spread
fn without_residue(variance: f64, n: f64, sum_sq: f64) -> f64 {
    if variance <= f64::EPSILON * n * n * sum_sq {
        0.0
    } else {
        variance
    }
}

/// Correlation strength bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl Strength {
    pub fn of(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= 0.8 {
            Strength::Strong
        } else if magnitude >= 0.5 {
            Strength::Moderate
        } else if magnitude >= 0.25 {
            Strength::Weak
        } else {
            Strength::Negligible
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Strong => write!(f, "Strong"),
            Strength::Moderate => write!(f, "Moderate"),
            Strength::Weak => write!(f, "Weak"),
            Strength::Negligible => write!(f, "Negligible"),
        }
    }
}

/// Correlation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
    /// Only produced in neutral-zero mode
    None,
}

impl Direction {
    /// Positive when r > 0, otherwise Negative (r = 0 included)
    ///
    /// With `neutral_zero` an exact zero reports [`Direction::None`] instead.
    pub fn of(r: f64, neutral_zero: bool) -> Self {
        if r > 0.0 {
            Direction::Positive
        } else if neutral_zero && r == 0.0 {
            Direction::None
        } else {
            Direction::Negative
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "Positive"),
            Direction::Negative => write!(f, "Negative"),
            Direction::None => write!(f, "No correlation"),
        }
    }
}
