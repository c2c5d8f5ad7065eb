//! Interpolation rules for tabulated data.
//!
//! The rules mirror the ENDF interpolation codes 1–5. Only
//! [`Interpolation::Histogram`] and [`Interpolation::LinLin`] can be
//! sampled by [`Tabular`](crate::Tabular); the logarithmic rules exist so
//! that configuration naming them fails with a precise error.

use std::fmt;
use std::str::FromStr;

use crate::distributions::DistributionError;

/// How a tabulated function varies between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// y is constant on `[x0, x1)` (ENDF code 1).
    #[default]
    Histogram,
    /// y is linear in x (ENDF code 2).
    LinLin,
    /// y is linear in ln(x) (ENDF code 3).
    LinLog,
    /// ln(y) is linear in x (ENDF code 4).
    LogLin,
    /// ln(y) is linear in ln(x) (ENDF code 5).
    LogLog,
}

impl Interpolation {
    /// Maps an ENDF interpolation code (1–5) to a rule.
    pub fn from_endf(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Histogram),
            2 => Some(Self::LinLin),
            3 => Some(Self::LinLog),
            4 => Some(Self::LogLin),
            5 => Some(Self::LogLog),
            _ => None,
        }
    }

    /// The ENDF code of this rule.
    pub fn endf_code(self) -> i32 {
        match self {
            Self::Histogram => 1,
            Self::LinLin => 2,
            Self::LinLog => 3,
            Self::LogLin => 4,
            Self::LogLog => 5,
        }
    }

    /// Configuration spelling of the rule.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::LinLin => "linear-linear",
            Self::LinLog => "linear-log",
            Self::LogLin => "log-linear",
            Self::LogLog => "log-log",
        }
    }

    /// Evaluates the rule between `(x0, y0)` and `(x1, y1)` at `x`.
    ///
    /// Logarithmic rules need positive values on the logged axis; outside
    /// that domain the result is NaN.
    ///
    /// # Examples
    /// ```
    /// use u_sampling::Interpolation;
    /// let y = Interpolation::LinLin.interpolate(0.0, 2.0, 1.0, 3.0, 1.0);
    /// assert!((y - 2.0).abs() < 1e-15);
    /// assert_eq!(Interpolation::Histogram.interpolate(0.0, 2.0, 1.0, 3.0, 1.0), 1.0);
    /// ```
    pub fn interpolate(self, x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
        if x1 == x0 {
            return y0;
        }
        match self {
            Self::Histogram => y0,
            Self::LinLin => y0 + (x - x0) / (x1 - x0) * (y1 - y0),
            Self::LinLog => y0 + (x / x0).ln() / (x1 / x0).ln() * (y1 - y0),
            Self::LogLin => y0 * ((x - x0) / (x1 - x0) * (y1 / y0).ln()).exp(),
            Self::LogLog => y0 * ((x / x0).ln() / (x1 / x0).ln() * (y1 / y0).ln()).exp(),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "histogram" => Ok(Self::Histogram),
            "linear-linear" => Ok(Self::LinLin),
            "linear-log" => Ok(Self::LinLog),
            "log-linear" => Ok(Self::LogLin),
            "log-log" => Ok(Self::LogLog),
            other => Err(DistributionError::InvalidInterpolation(other.to_string())),
        }
    }
}
