use rand::Rng;

use super::DistributionError;
use crate::random::{open_prn, prn};
use crate::special::regularized_lower_gamma;

/// Maxwellian energy spectrum with density `c·√E·exp(−E/θ)`.
///
/// # Mathematical Definition
/// - The energy is Gamma(3/2, θ) distributed
/// - CDF: P(3/2, E/θ) (regularized lower incomplete gamma)
/// - Mean: 3θ/2
#[derive(Debug, Clone, PartialEq)]
pub struct Maxwell {
    theta: f64,
}

impl Maxwell {
    /// Creates a Maxwell spectrum with temperature `theta` (energy units).
    ///
    /// # Errors
    /// Returns `Err` if `theta ≤ 0`, is not finite, or is so large that a
    /// sample could overflow.
    pub fn new(theta: f64) -> Result<Self, DistributionError> {
        if !theta.is_finite() || theta <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Maxwell requires finite θ > 0, got θ={theta}"
            )));
        }
        if !max_maxwell_sample(theta).is_finite() {
            return Err(DistributionError::InvalidParameters(format!(
                "Maxwell θ={theta} is too large: samples would overflow"
            )));
        }
        Ok(Self { theta })
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Mean = 3θ/2.
    pub fn mean(&self) -> f64 {
        1.5 * self.theta
    }

    /// CDF: P(3/2, E/θ), zero for E ≤ 0.
    pub fn cdf(&self, e: f64) -> f64 {
        regularized_lower_gamma(1.5, e / self.theta)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        maxwell_spectrum(self.theta, rng)
    }
}

/// Largest value [`maxwell_spectrum`] can return for `theta`: both
/// logarithms at the smallest positive `f64`.
pub(super) fn max_maxwell_sample(theta: f64) -> f64 {
    -2.0 * theta * f64::MIN_POSITIVE.ln()
}

/// Samples an energy from the Maxwell spectrum `√E·exp(−E/θ)`.
///
/// # Algorithm
/// The energy is the sum of an exponential variate and a Gamma(1/2)
/// variate `−θ·ln(r)·cos²(φ)` with φ uniform on `[0, π/2)`. The cosine is
/// obtained by rejection: a point `(r1, r2)` drawn in the unit square is
/// kept only inside the quarter disk, where `r1²/(r1² + r2²)` has the law
/// of `cos²φ`. Acceptance probability is π/4, so the expected number of
/// trials is 4/π ≈ 1.27.
///
/// Reference: Everett & Cashwell (1983), *A Third Monte Carlo Sampler*,
/// LA-9721-MS, rule C64.
///
/// # Examples
/// ```
/// use u_sampling::distributions::maxwell_spectrum;
/// use u_sampling::random::create_rng;
/// let mut rng = create_rng(42);
/// let e = maxwell_spectrum(1.0e6, &mut rng);
/// assert!(e >= 0.0 && e.is_finite());
/// ```
pub fn maxwell_spectrum<R: Rng + ?Sized>(theta: f64, rng: &mut R) -> f64 {
    loop {
        let r1 = prn(rng);
        let r2 = prn(rng);
        let s = r1 * r1 + r2 * r2;
        if s > 1.0 || s == 0.0 {
            continue;
        }
        let cos2 = r1 * r1 / s;
        return -theta * (open_prn(rng).ln() * cos2 + open_prn(rng).ln());
    }
}
