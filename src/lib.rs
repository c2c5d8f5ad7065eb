//! # u-sampling
//!
//! Univariate probability distributions for Monte Carlo particle transport.
//!
//! Each distribution is built once from plain numeric arrays (or from a
//! configuration node through [`factory`]) and then sampled many millions
//! of times with a caller-supplied random source. Sampling never fails:
//! every parameter check happens at construction.
//!
//! ## Modules
//!
//! - [`distributions`] — Discrete, Uniform, Maxwell, Watt, Tabular and
//!   Equiprobable samplers behind the closed [`Distribution`] enum
//! - [`interpolation`] — ENDF interpolation rules for tabulated densities
//! - [`factory`] — builds a [`Distribution`] from a configuration node
//! - [`random`] — seeded RNG construction and uniform variate draws
//! - [`stats`] — compensated summation, Welford moments, goodness-of-fit
//! - [`special`] — special functions backing the goodness-of-fit test
//!
//! ## Design Philosophy
//!
//! - **Immutable after construction**: normalization and CDF tables are
//!   computed once, so `&self` sampling is safe from many threads
//! - **Caller owns the entropy**: every sampler takes `&mut R: Rng`
//! - **Property-based testing**: sampling laws verified via proptest

pub mod distributions;
pub mod factory;
pub mod interpolation;
pub mod random;
pub mod special;
pub mod stats;

pub use distributions::{
    Discrete, Distribution, DistributionError, Equiprobable, Maxwell, Tabular, Uniform, Watt,
};
pub use factory::{distribution_from_config, distribution_from_json, DistributionConfig};
pub use interpolation::Interpolation;
