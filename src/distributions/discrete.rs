use rand::Rng;

use super::{check_finite, check_same_len, DistributionError};
use crate::random::prn;
use crate::stats::kahan_sum;

/// Deviation of the raw probability mass from unity above which
/// construction logs a warning.
const RENORMALIZATION_WARN: f64 = 1e-6;

/// Discrete distribution (probability mass function) over explicit outcomes.
///
/// Probabilities are normalized once at construction. Sampling searches a
/// precomputed cumulative table, so each draw costs O(log n).
///
/// # Examples
/// ```
/// use u_sampling::Discrete;
/// use u_sampling::random::create_rng;
/// let d = Discrete::new(&[1.0, 2.0, 3.0], &[2.0, 1.0, 1.0]).unwrap();
/// assert_eq!(d.p(), &[0.5, 0.25, 0.25]);
/// let mut rng = create_rng(42);
/// let x = d.sample(&mut rng);
/// assert!([1.0, 2.0, 3.0].contains(&x));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Discrete {
    x: Vec<f64>,
    p: Vec<f64>,
    cdf: Vec<f64>,
}

impl Discrete {
    /// Creates a discrete distribution from outcomes `x` and weights `p`.
    ///
    /// # Errors
    /// Returns `Err` if the arrays differ in length or are empty, any entry
    /// is not finite, any weight is negative, or the weights do not sum to
    /// a finite positive value.
    pub fn new(x: &[f64], p: &[f64]) -> Result<Self, DistributionError> {
        check_same_len(x, p)?;
        if x.is_empty() {
            return Err(DistributionError::InvalidParameters(
                "Discrete requires at least one outcome".into(),
            ));
        }
        check_finite("x", x)?;
        check_finite("p", p)?;
        if let Some(i) = p.iter().position(|&w| w < 0.0) {
            return Err(DistributionError::InvalidParameters(format!(
                "Discrete probability p[{i}] = {} is negative",
                p[i]
            )));
        }

        let total = kahan_sum(p);
        if !total.is_finite() || total <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Discrete probabilities must sum to a finite positive value, got {total}"
            )));
        }
        if (total - 1.0).abs() > RENORMALIZATION_WARN {
            log::warn!("discrete probabilities sum to {total}; renormalizing to unity");
        }

        let p: Vec<f64> = p.iter().map(|&w| w / total).collect();
        let mut cdf = Vec::with_capacity(p.len());
        let mut running = 0.0;
        for &w in &p {
            running += w;
            cdf.push(running);
        }

        Ok(Self {
            x: x.to_vec(),
            p,
            cdf,
        })
    }

    /// Possible outcomes.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Normalized probability of each outcome.
    pub fn p(&self) -> &[f64] {
        &self.p
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Mean = Σ xᵢ·pᵢ.
    pub fn mean(&self) -> f64 {
        self.x.iter().zip(&self.p).map(|(x, p)| x * p).sum()
    }

    /// Samples an outcome.
    ///
    /// Returns `x[i]` for the smallest `i` whose cumulative probability
    /// exceeds the uniform draw. If rounding leaves the draw above the
    /// final cumulative value, the last outcome is returned.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = prn(rng);
        self.x[self.index_for(u)]
    }

    fn index_for(&self, u: f64) -> usize {
        self.cdf
            .partition_point(|&c| c <= u)
            .min(self.x.len() - 1)
    }
}
