use rand::Rng;

use super::{check_finite, DistributionError};
use crate::random::prn;

/// Equiprobable bins: `n` boundaries define `n − 1` intervals of equal
/// probability, each sampled uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Equiprobable {
    x: Vec<f64>,
}

impl Equiprobable {
    /// Creates an equiprobable-bin distribution from ordered boundaries.
    ///
    /// # Errors
    /// Returns `Err` if fewer than two boundaries are given, any boundary
    /// is not finite, or the boundaries decrease.
    pub fn new(x: &[f64]) -> Result<Self, DistributionError> {
        if x.len() < 2 {
            return Err(DistributionError::InvalidParameters(format!(
                "Equiprobable requires at least 2 boundaries, got {}",
                x.len()
            )));
        }
        check_finite("x", x)?;
        if let Some(i) = x.windows(2).position(|w| w[1] < w[0]) {
            return Err(DistributionError::InvalidParameters(format!(
                "Equiprobable boundaries must be non-decreasing, got x[{}] = {} then x[{}] = {}",
                i,
                x[i],
                i + 1,
                x[i + 1]
            )));
        }
        Ok(Self { x: x.to_vec() })
    }

    /// Bin boundaries.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Mean = average of the bin midpoints.
    pub fn mean(&self) -> f64 {
        let bins = (self.x.len() - 1) as f64;
        self.x.windows(2).map(|w| 0.5 * (w[0] + w[1])).sum::<f64>() / bins
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.invert(prn(rng))
    }

    fn invert(&self, u: f64) -> f64 {
        let bins = self.x.len() - 1;
        let scaled = u * bins as f64;
        let i = (scaled.floor() as usize).min(bins - 1);
        let (xl, xr) = (self.x[i], self.x[i + 1]);
        xl + (scaled - i as f64) * (xr - xl)
    }
}
