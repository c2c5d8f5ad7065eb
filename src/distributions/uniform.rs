use rand::Rng;

use super::DistributionError;
use crate::random::prn;

/// Continuous uniform distribution on `[a, b)`.
///
/// `a == b` is allowed and yields the constant `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    a: f64,
    b: f64,
}

impl Uniform {
    /// Creates a new uniform distribution on `[a, b)`.
    ///
    /// # Errors
    /// Returns `Err` if `a > b` or either bound is not finite. Swapped
    /// bounds are treated as a configuration mistake, not reordered.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        if !a.is_finite() || !b.is_finite() || a > b {
            return Err(DistributionError::InvalidParameters(format!(
                "Uniform requires finite a ≤ b, got a={a}, b={b}"
            )));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn mean(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    /// Returns `a + u·(b − a)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.a + prn(rng) * (self.b - self.a)
    }
}
