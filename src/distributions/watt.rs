use rand::Rng;

use super::maxwell::max_maxwell_sample;
use super::{maxwell_spectrum, DistributionError};
use crate::random::prn;

/// Watt fission spectrum with density `c·exp(−E/a)·sinh(√(b·E))`.
///
/// # Mathematical Definition
/// - Mean: 3a/2 + a²b/4
/// - `b = 0` reduces to a Maxwell spectrum with θ = a
#[derive(Debug, Clone, PartialEq)]
pub struct Watt {
    a: f64,
    b: f64,
}

impl Watt {
    /// Creates a Watt spectrum.
    ///
    /// # Errors
    /// Returns `Err` if `a ≤ 0`, `b < 0`, either is not finite, or the
    /// largest possible sample would overflow.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        if !a.is_finite() || !b.is_finite() || a <= 0.0 || b < 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Watt requires finite a > 0 and b ≥ 0, got a={a}, b={b}"
            )));
        }
        let w_max = max_maxwell_sample(a);
        let e_max = w_max + 0.25 * a * (a * b) + a * (b * w_max).sqrt();
        if !e_max.is_finite() {
            return Err(DistributionError::InvalidParameters(format!(
                "Watt a={a}, b={b} are too large: samples would overflow"
            )));
        }
        Ok(Self { a, b })
    }

    /// Factor in the exponential.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Factor in the square root.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Mean = 3a/2 + a²b/4.
    pub fn mean(&self) -> f64 {
        1.5 * self.a + 0.25 * self.a * (self.a * self.b)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        watt_spectrum(self.a, self.b, rng)
    }
}

/// Samples an energy from the Watt spectrum `exp(−E/a)·sinh(√(b·E))`.
///
/// # Algorithm
/// Draws `w` from a Maxwell spectrum with θ = a, then shifts it with a
/// second uniform `u` correlated through `w`:
///
/// ```text
/// E = w + a²b/4 + (2u − 1)·a·√(b·w)
/// ```
///
/// The smallest candidate is `(√w − a√b/2)² ≥ 0`, so only rounding can
/// push `E` below zero. Such a candidate is rejected and both draws are
/// repeated.
///
/// Reference: Romano & Forget (2013), "The OpenMC Monte Carlo particle
/// transport code", *Annals of Nuclear Energy* 51.
pub fn watt_spectrum<R: Rng + ?Sized>(a: f64, b: f64, rng: &mut R) -> f64 {
    loop {
        let w = maxwell_spectrum(a, rng);
        let e = w + 0.25 * a * (a * b) + (2.0 * prn(rng) - 1.0) * a * (b * w).sqrt();
        if e >= 0.0 && e.is_finite() {
            return e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats::WelfordAccumulator;

    /// U-235 thermal fission parameters (eV, 1/eV).
    const A_U235: f64 = 0.988e6;
    const B_U235: f64 = 2.249e-6;

    #[test]
    fn test_watt_mean_converges() {
        let w = Watt::new(A_U235, B_U235).unwrap();
        let mut rng = create_rng(42);
        let mut acc = WelfordAccumulator::new();
        acc.extend((0..200_000).map(|_| w.sample(&mut rng)));
        let mean = acc.mean().unwrap();
        let se = acc.std_error().unwrap();
        assert!(
            (mean - w.mean()).abs() < 5.0 * se,
            "mean {mean} vs {} (se {se})",
            w.mean()
        );
    }

    #[test]
    fn test_watt_b_zero_is_maxwell() {
        let w = Watt::new(1.0, 0.0).unwrap();
        let mut a = create_rng(3);
        let mut b = create_rng(3);
        for _ in 0..100 {
            let e = w.sample(&mut a);
            let m = maxwell_spectrum(1.0, &mut b);
            // the shift term vanishes but still consumes one draw
            let _ = prn(&mut b);
            assert_eq!(e, m);
        }
    }

    #[test]
    fn test_watt_never_negative_or_non_finite() {
        let w = Watt::new(A_U235, B_U235).unwrap();
        let mut rng = create_rng(2718);
        for _ in 0..1_000_000 {
            let e = w.sample(&mut rng);
            assert!(e.is_finite() && e >= 0.0, "bad sample {e}");
        }
    }

    #[test]
    fn test_watt_invalid() {
        assert!(Watt::new(0.0, 1.0).is_err());
        assert!(Watt::new(-1.0, 1.0).is_err());
        assert!(Watt::new(1.0, -1.0).is_err());
        assert!(Watt::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_watt_overflowing_parameters_rejected() {
        assert!(matches!(
            Watt::new(1e160, 1.0),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(Watt::new(1e308, 0.0).is_err());
    }

    #[test]
    fn test_watt_large_a_small_b_samples_finite() {
        // a² alone overflows, a²b does not
        let w = Watt::new(1e160, 1e-200).unwrap();
        assert!(w.mean().is_finite());
        let mut rng = create_rng(77);
        for _ in 0..10_000 {
            let e = w.sample(&mut rng);
            assert!(e.is_finite() && e >= 0.0, "bad sample {e}");
        }
    }
}
