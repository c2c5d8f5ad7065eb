//! Univariate probability distributions.
//!
//! Each variant owns its parameters, validates them once at construction
//! and is immutable afterwards. Sampling takes `&self` plus a caller-owned
//! random source, so one instance can be shared by many transport threads.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Method | Cost |
//! |---|---|---|---|
//! | [`Discrete`] | x, p | CDF binary search | O(log n) |
//! | [`Uniform`] | a, b | inverse transform | O(1) |
//! | [`Maxwell`] | θ | rejection (quarter disk) | O(1) expected |
//! | [`Watt`] | a, b | Maxwell + correlated shift | O(1) expected |
//! | [`Tabular`] | x, p, rule | CDF binary search + inversion | O(log n) |
//! | [`Equiprobable`] | x | bin index + linear | O(1) |
//!
//! # Errors
//!
//! Every check happens at construction and is reported as a
//! [`DistributionError`]. Sampling never fails.

mod discrete;
mod equiprobable;
mod maxwell;
mod tabular;
mod uniform;
mod watt;

pub use discrete::Discrete;
pub use equiprobable::Equiprobable;
pub use maxwell::{maxwell_spectrum, Maxwell};
pub use tabular::Tabular;
pub use uniform::Uniform;
pub use watt::{watt_spectrum, Watt};

use rand::Rng;
use thiserror::Error;

use crate::interpolation::Interpolation;

/// Error type for distribution construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// The configuration node has no type discriminator.
    #[error("missing 'type' attribute on distribution")]
    MissingType,

    /// The type discriminator names no known distribution.
    #[error("invalid distribution type: {0}")]
    UnknownType(String),

    /// The configuration node carries no numeric payload.
    #[error("no parameters specified for {0} distribution")]
    MissingParameters(&'static str),

    /// A fixed-arity distribution got the wrong number of parameters.
    #[error("{kind} distribution expects {expected} parameter(s), got {got}")]
    ParameterCount {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    /// Parallel arrays differ in length.
    #[error("array length mismatch: expected {expected} entries, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// The rule is valid ENDF but cannot be sampled by a tabular distribution.
    #[error("{0} interpolation is not supported for tabular distributions")]
    UnsupportedInterpolation(Interpolation),

    /// The interpolation string names no known rule.
    #[error("invalid interpolation rule: {0}")]
    InvalidInterpolation(String),

    /// A parameter token is not a number.
    #[error("invalid number in parameters: {0:?}")]
    InvalidNumber(String),

    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),

    /// The configuration document could not be deserialized.
    #[error("malformed distribution configuration: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DistributionError {
    fn from(e: serde_json::Error) -> Self {
        DistributionError::Malformed(e.to_string())
    }
}

/// A univariate distribution that can be sampled.
///
/// Closed over the supported variants; each carries its own parameters.
/// Implements [`rand::distr::Distribution<f64>`], so it also works with
/// `rng.sample(&dist)` and `dist.sample_iter(rng)`.
///
/// # Examples
/// ```
/// use u_sampling::{Distribution, Maxwell};
/// use u_sampling::random::create_rng;
/// let dist = Distribution::from(Maxwell::new(1.0e6).unwrap());
/// let mut rng = create_rng(42);
/// let e = dist.sample(&mut rng);
/// assert!(e >= 0.0 && e.is_finite());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Discrete(Discrete),
    Uniform(Uniform),
    Maxwell(Maxwell),
    Watt(Watt),
    Tabular(Tabular),
    Equiprobable(Equiprobable),
}

impl Distribution {
    /// Draws one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Distribution::Discrete(d) => d.sample(rng),
            Distribution::Uniform(d) => d.sample(rng),
            Distribution::Maxwell(d) => d.sample(rng),
            Distribution::Watt(d) => d.sample(rng),
            Distribution::Tabular(d) => d.sample(rng),
            Distribution::Equiprobable(d) => d.sample(rng),
        }
    }

    /// Analytic mean of the distribution.
    pub fn mean(&self) -> f64 {
        match self {
            Distribution::Discrete(d) => d.mean(),
            Distribution::Uniform(d) => d.mean(),
            Distribution::Maxwell(d) => d.mean(),
            Distribution::Watt(d) => d.mean(),
            Distribution::Tabular(d) => d.mean(),
            Distribution::Equiprobable(d) => d.mean(),
        }
    }

    /// Configuration name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Distribution::Discrete(_) => "discrete",
            Distribution::Uniform(_) => "uniform",
            Distribution::Maxwell(_) => "maxwell",
            Distribution::Watt(_) => "watt",
            Distribution::Tabular(_) => "tabular",
            Distribution::Equiprobable(_) => "equiprobable",
        }
    }
}

impl rand::distr::Distribution<f64> for Distribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Distribution::sample(self, rng)
    }
}

macro_rules! impl_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Distribution {
                fn from(d: $variant) -> Self {
                    Distribution::$variant(d)
                }
            }

            impl rand::distr::Distribution<f64> for $variant {
                fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
                    $variant::sample(self, rng)
                }
            }
        )*
    };
}

impl_variant!(Discrete, Uniform, Maxwell, Watt, Tabular, Equiprobable);

/// Rejects non-finite entries, naming the offending array.
fn check_finite(name: &str, values: &[f64]) -> Result<(), DistributionError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(DistributionError::InvalidParameters(format!(
            "{name}[{i}] = {} is not finite",
            values[i]
        ))),
        None => Ok(()),
    }
}

/// Rejects parallel arrays of different length.
fn check_same_len(x: &[f64], p: &[f64]) -> Result<(), DistributionError> {
    if x.len() != p.len() {
        return Err(DistributionError::LengthMismatch {
            expected: x.len(),
            got: p.len(),
        });
    }
    Ok(())
}
