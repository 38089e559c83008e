//! Direct Poisson sampling.
//!
//! A Poisson(λ) count is the number of unit-rate arrivals that fit into an interval of length λ,
//! so it can be drawn by generating exponential inter-arrival times until their sum passes the
//! end of the interval. Two equivalent formulations are provided, see [`Method`].

use rand::{Rng, distr::Distribution};

use crate::{Error, Result, uniform::uniform};

/// Rate above which the direct method becomes slow and loses accuracy.
///
/// Larger rates are still accepted, but a warning is logged.
pub const RECOMMENDED_MAX_LAMBDA: f64 = 20.0;

/// Largest accepted rate, `-ln(f64::MIN_POSITIVE)`.
///
/// Beyond it `exp(-λ)` is subnormal and the product threshold is too coarse to be exact.
pub const MAX_LAMBDA: f64 = 708.396_418_532_264_1;

/// Formulation of the direct method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Multiply uniforms until the product drops to `exp(-λ)` or below.
    #[default]
    Product,
    /// Sum exponential inter-arrival times `-ln(U) / λ` until the sum reaches 1.
    ///
    /// This is the log transform of [`Method::Product`]. Given the same uniform draws both
    /// methods return the same count.
    InterArrival,
}

/// A Poisson distribution sampled with the direct method.
///
/// The number of uniform draws per sample is one more than the returned count, so the expected
/// cost grows linearly with λ. This is only suitable for small rates (λ < 20).
///
/// # Example
///
/// ```
/// use poisson_direct::prelude::*;
/// use rand::distr::Distribution;
///
/// let poisson = PoissonDirect::new(8.7).unwrap();
/// let mut rng = seeded_rng(42);
/// let k: u32 = poisson.sample(&mut rng);
/// # let _ = k;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoissonDirect {
    lambda: f64,
    exp_neg_lambda: f64,
    method: Method,
}

impl PoissonDirect {
    /// Create a sampler for the given rate using [`Method::Product`].
    pub fn new(lambda: f64) -> Result<Self> {
        Self::with_method(lambda, Method::default())
    }

    /// Create a sampler for the given rate and method.
    ///
    /// Returns [`Error::InvalidParameter`] if `lambda` is not a positive finite number, or is so
    /// large that `exp(-lambda)` is no longer a normal float (λ > [`MAX_LAMBDA`]).
    pub fn with_method(lambda: f64, method: Method) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(Error::InvalidParameter {
                name: "lambda",
                value: lambda,
                reason: "must be positive and finite",
            });
        }

        let exp_neg_lambda = (-lambda).exp();
        // Subnormal thresholds lose precision and break the product method
        if exp_neg_lambda < f64::MIN_POSITIVE {
            return Err(Error::InvalidParameter {
                name: "lambda",
                value: lambda,
                reason: "exp(-lambda) is subnormal",
            });
        }

        if lambda > RECOMMENDED_MAX_LAMBDA {
            tracing::warn!(
                lambda,
                max = RECOMMENDED_MAX_LAMBDA,
                "rate is too large for the direct method to be accurate"
            );
        }

        Ok(Self {
            lambda,
            exp_neg_lambda,
            method,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Draw `count` independent samples from the same engine.
    pub fn sample_many<G: Rng + ?Sized>(&self, rng: &mut G, count: usize) -> Vec<u32> {
        let samples: Vec<u32> = (0..count).map(|_| self.sample(rng)).collect();
        tracing::debug!(
            lambda = self.lambda,
            method = ?self.method,
            count,
            "sampled batch"
        );
        samples
    }

    fn sample_product<G: Rng + ?Sized>(&self, rng: &mut G) -> u32 {
        let mut k = 0;
        let mut p = 1.0;
        loop {
            p *= uniform(rng);
            if p <= self.exp_neg_lambda {
                break k;
            }
            k += 1;
        }
    }

    fn sample_inter_arrival<G: Rng + ?Sized>(&self, rng: &mut G) -> u32 {
        let mut k = 0;
        let mut s = 0.0;
        loop {
            s += -uniform(rng).ln() / self.lambda;
            if s >= 1.0 {
                break k;
            }
            k += 1;
        }
    }
}

impl Distribution<u32> for PoissonDirect {
    fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> u32 {
        match self.method {
            Method::Product => self.sample_product(rng),
            Method::InterArrival => self.sample_inter_arrival(rng),
        }
    }
}

/// Draw a single Poisson(λ) sample with the default method.
pub fn sample_poisson<G: Rng + ?Sized>(rng: &mut G, lambda: f64) -> Result<u32> {
    Ok(PoissonDirect::new(lambda)?.sample(rng))
}

/// Draw `count` independent Poisson(λ) samples with the default method.
///
/// The rate is validated even when `count` is zero.
pub fn sample_poisson_many<G: Rng + ?Sized>(
    rng: &mut G,
    lambda: f64,
    count: usize,
) -> Result<Vec<u32>> {
    Ok(PoissonDirect::new(lambda)?.sample_many(rng, count))
}
