//! Numerically stable accumulation and sampler validation.
//!
//! # Algorithms
//!
//! - **Sums**: Neumaier compensated summation, used when normalizing
//!   probability tables.
//! - **Mean/Variance**: Welford's online algorithm, so sample moments can
//!   be accumulated over millions of draws without storing them.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Goodness of fit**: Pearson's chi-squared test against the expected
//!   cell probabilities of a distribution.

use crate::special;

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *Zeitschrift für Angewandte
/// Mathematik und Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for mean and variance.
///
/// # Examples
/// ```
/// use u_sampling::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean_acc)
        }
    }

    /// Returns the sample variance (n − 1 denominator), or `None` if fewer
    /// than 2 samples have been added.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    /// Standard error of the running mean, or `None` with fewer than 2
    /// samples.
    pub fn std_error(&self) -> Option<f64> {
        self.sample_variance().map(|v| (v / self.count as f64).sqrt())
    }
}

impl Extend<f64> for WelfordAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

// ---------------------------------------------------------------------------
// Goodness of fit
// ---------------------------------------------------------------------------

/// Result of a Pearson chi-squared goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquaredTest {
    /// Σ (observed − expected)² / expected over the cells used.
    pub statistic: f64,
    /// Number of cells with positive expected count, minus one.
    pub degrees_of_freedom: usize,
    /// P(X > statistic) under the null hypothesis.
    pub p_value: f64,
}

/// Pearson chi-squared test of observed counts against cell probabilities.
///
/// Cells with zero expected probability are dropped from the statistic;
/// an observation in such a cell makes the statistic infinite and the
/// p-value zero. `probabilities` need not be normalized.
///
/// # Returns
/// - `None` if the slices differ in length, no counts were observed, any
///   probability is negative or non-finite, or fewer than two cells have
///   positive probability.
///
/// # Examples
/// ```
/// use u_sampling::stats::chi_squared_test;
/// let t = chi_squared_test(&[98, 102, 100], &[1.0, 1.0, 1.0]).unwrap();
/// assert_eq!(t.degrees_of_freedom, 2);
/// assert!(t.p_value > 0.9);
/// ```
pub fn chi_squared_test(observed: &[u64], probabilities: &[f64]) -> Option<ChiSquaredTest> {
    if observed.len() != probabilities.len() {
        return None;
    }
    if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return None;
    }
    let n: u64 = observed.iter().sum();
    let total_p = kahan_sum(probabilities);
    if n == 0 || total_p <= 0.0 {
        return None;
    }

    let mut statistic = 0.0;
    let mut cells = 0_usize;
    for (&o, &p) in observed.iter().zip(probabilities) {
        let expected = n as f64 * p / total_p;
        if expected > 0.0 {
            let d = o as f64 - expected;
            statistic += d * d / expected;
            cells += 1;
        } else if o > 0 {
            statistic = f64::INFINITY;
        }
    }
    if cells < 2 {
        return None;
    }

    let degrees_of_freedom = cells - 1;
    Some(ChiSquaredTest {
        statistic,
        degrees_of_freedom,
        p_value: special::chi_squared_sf(statistic, degrees_of_freedom as f64),
    })
}

/// Counts how many values fall in each half-open bin `[edges[i], edges[i+1])`.
///
/// Values outside `[edges[0], edges[last])` are ignored. Returns an empty
/// vector when fewer than two edges are given.
///
/// # Examples
/// ```
/// use u_sampling::stats::bin_counts;
/// let counts = bin_counts(&[0.1, 0.5, 1.5, 2.9, 3.0], &[0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(counts, vec![2, 1, 1]);
/// ```
pub fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<u64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let mut counts = vec![0_u64; edges.len() - 1];
    let (lo, hi) = (edges[0], edges[edges.len() - 1]);
    for &x in data {
        if !(x >= lo && x < hi) {
            continue;
        }
        // first edge strictly greater than x closes the bin
        let k = edges.partition_point(|&e| e <= x);
        counts[k - 1] += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
