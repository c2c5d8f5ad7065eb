use rand::Rng;

use super::{check_finite, check_same_len, DistributionError};
use crate::interpolation::Interpolation;
use crate::random::prn;

/// Relative density difference under which a linear-linear segment is
/// sampled as if it were flat.
const FLAT_SEGMENT_TOL: f64 = 1e-12;

/// Tabulated distribution with histogram or linear-linear interpolation.
///
/// Stores the grid `x`, the density `p` and the cumulative distribution
/// `c` at every grid point. `p` and `c` are normalized together at
/// construction so that `c[0] = 0` and `c[n−1] = 1`; they are never
/// modified afterwards.
///
/// Sampling inverts the CDF: a binary search on `c` locates the interval,
/// then the interval's CDF (linear for histogram, quadratic for
/// linear-linear) is solved in closed form.
///
/// # Examples
/// ```
/// use u_sampling::{Interpolation, Tabular};
/// use u_sampling::random::create_rng;
/// // triangular density on [0, 2]
/// let t = Tabular::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], Interpolation::LinLin, None).unwrap();
/// assert_eq!(t.c(), &[0.0, 0.5, 1.0]);
/// let mut rng = create_rng(42);
/// let x = t.sample(&mut rng);
/// assert!((0.0..=2.0).contains(&x));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tabular {
    x: Vec<f64>,
    p: Vec<f64>,
    c: Vec<f64>,
    interp: Interpolation,
}

impl Tabular {
    /// Creates a tabular distribution.
    ///
    /// When `c` is `None` the cumulative distribution is integrated from
    /// `p` under `interp`: `p[i−1]·Δx` per interval for histogram, the
    /// trapezoid rule for linear-linear. A supplied `c` must start at zero
    /// and be non-decreasing. Either way `p` and `c` are divided by the
    /// final cumulative value.
    ///
    /// For histogram data the last density value closes the grid and
    /// carries no mass.
    ///
    /// # Errors
    /// Returns `Err` if
    /// - `interp` is not histogram or linear-linear,
    /// - fewer than two points are given or the arrays differ in length,
    /// - `x` is not strictly increasing or any value is not finite,
    /// - any density is negative,
    /// - a supplied `c` does not start at zero or decreases,
    /// - the total probability mass is not finite and positive.
    pub fn new(
        x: &[f64],
        p: &[f64],
        interp: Interpolation,
        c: Option<&[f64]>,
    ) -> Result<Self, DistributionError> {
        if !matches!(interp, Interpolation::Histogram | Interpolation::LinLin) {
            return Err(DistributionError::UnsupportedInterpolation(interp));
        }
        check_same_len(x, p)?;
        if x.len() < 2 {
            return Err(DistributionError::InvalidParameters(format!(
                "Tabular requires at least 2 grid points, got {}",
                x.len()
            )));
        }
        check_finite("x", x)?;
        check_finite("p", p)?;
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DistributionError::InvalidParameters(format!(
                "Tabular grid must be strictly increasing, got x[{}] = {} then x[{}] = {}",
                i,
                x[i],
                i + 1,
                x[i + 1]
            )));
        }
        if let Some(i) = p.iter().position(|&v| v < 0.0) {
            return Err(DistributionError::InvalidParameters(format!(
                "Tabular density p[{i}] = {} is negative",
                p[i]
            )));
        }

        let c = match c {
            Some(c) => {
                check_same_len(x, c)?;
                check_finite("c", c)?;
                if c[0] != 0.0 {
                    return Err(DistributionError::InvalidParameters(format!(
                        "Tabular cumulative distribution must start at 0, got {}",
                        c[0]
                    )));
                }
                if let Some(i) = c.windows(2).position(|w| w[1] < w[0]) {
                    return Err(DistributionError::InvalidParameters(format!(
                        "Tabular cumulative distribution decreases at c[{}]",
                        i + 1
                    )));
                }
                c.to_vec()
            }
            None => integrate(x, p, interp),
        };

        let total = c[c.len() - 1];
        if !total.is_finite() || total <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Tabular total probability must be finite and positive, got {total}"
            )));
        }

        let empty_bins = c.windows(2).filter(|w| w[1] == w[0]).count();
        if empty_bins > 0 {
            log::debug!("tabular distribution has {empty_bins} zero-probability interval(s)");
        }

        Ok(Self {
            x: x.to_vec(),
            p: p.iter().map(|v| v / total).collect(),
            c: c.iter().map(|v| v / total).collect(),
            interp,
        })
    }

    /// Tabulated independent variable.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Normalized tabulated density.
    pub fn p(&self) -> &[f64] {
        &self.p
    }

    /// Cumulative distribution at each grid point.
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interp
    }

    /// Normalized density at `x`; zero outside the grid.
    pub fn pdf(&self, x: f64) -> f64 {
        match self.interval(x) {
            Some(i) => self.interp.interpolate(
                self.x[i],
                self.x[i + 1],
                self.p[i],
                self.p[i + 1],
                x,
            ),
            None => 0.0,
        }
    }

    /// Cumulative probability at `x`, clamped to `[0, 1]`.
    pub fn cdf(&self, x: f64) -> f64 {
        let n = self.x.len();
        if x <= self.x[0] {
            return 0.0;
        }
        if x >= self.x[n - 1] {
            return 1.0;
        }
        let i = self.x.partition_point(|&xi| xi <= x) - 1;
        let dx = x - self.x[i];
        let integral = match self.interp {
            Interpolation::LinLin => 0.5 * dx * (self.p[i] + self.pdf(x)),
            _ => self.p[i] * dx,
        };
        (self.c[i] + integral).clamp(self.c[i], self.c[i + 1])
    }

    /// Mean of the tabulated density.
    pub fn mean(&self) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.x.len() - 1 {
            let (x0, x1) = (self.x[i], self.x[i + 1]);
            let h = x1 - x0;
            sum += match self.interp {
                // ∫ x·f(x) dx is exact for linear f
                Interpolation::LinLin => {
                    h * (self.p[i] * (2.0 * x0 + x1) + self.p[i + 1] * (x0 + 2.0 * x1)) / 6.0
                }
                _ => self.p[i] * h * 0.5 * (x0 + x1),
            };
        }
        sum
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.invert(prn(rng))
    }

    /// Inverts the CDF at `u ∈ [0, 1)`.
    fn invert(&self, u: f64) -> f64 {
        let n = self.c.len();
        // c[i] <= u < c[i+1], skipping zero-mass intervals
        let i = self.c.partition_point(|&ci| ci <= u).clamp(1, n - 1) - 1;

        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (p0, c0) = (self.p[i], self.c[i]);
        let du = u - c0;

        let value = match self.interp {
            Interpolation::LinLin => {
                let p1 = self.p[i + 1];
                if (p1 - p0).abs() <= FLAT_SEGMENT_TOL * p0.max(p1) {
                    histogram_inverse(x0, p0, du)
                } else {
                    let m = (p1 - p0) / (x1 - x0);
                    let root = (p0 * p0 + 2.0 * m * du).max(0.0).sqrt();
                    // (root − p0)/m rewritten to avoid cancellation for small m
                    let denom = p0 + root;
                    if denom > 0.0 {
                        x0 + 2.0 * du / denom
                    } else {
                        x0
                    }
                }
            }
            _ => histogram_inverse(x0, p0, du),
        };
        value.min(x1)
    }

    /// Index of the interval containing `x`, if inside the grid.
    fn interval(&self, x: f64) -> Option<usize> {
        let n = self.x.len();
        if x < self.x[0] || x > self.x[n - 1] {
            return None;
        }
        if x == self.x[n - 1] {
            // histogram densities are right-open
            return match self.interp {
                Interpolation::LinLin => Some(n - 2),
                _ => None,
            };
        }
        Some(self.x.partition_point(|&xi| xi <= x) - 1)
    }
}

/// Inverse of a constant density on an interval; a zero-density bin
/// returns its left edge.
fn histogram_inverse(x0: f64, p0: f64, du: f64) -> f64 {
    if p0 > 0.0 {
        x0 + du / p0
    } else {
        x0
    }
}

/// Running integral of `p` over the grid under `interp`, starting at zero.
fn integrate(x: &[f64], p: &[f64], interp: Interpolation) -> Vec<f64> {
    let mut c = Vec::with_capacity(x.len());
    c.push(0.0);
    for i in 1..x.len() {
        let dx = x[i] - x[i - 1];
        let area = match interp {
            Interpolation::LinLin => 0.5 * (p[i - 1] + p[i]) * dx,
            _ => p[i - 1] * dx,
        };
        c.push(c[i - 1] + area);
    }
    c
}
