//! Uniform draws on `(0, 1]` and the engines that produce them.
//!
//! There is no global engine. Callers own a [`SmallRng`] (or any other [`Rng`]) and pass it by
//! mutable reference into every draw, so two callers never share a sequence by accident.

use rand::{Rng, SeedableRng, distr::OpenClosed01, rngs::SmallRng};

use crate::{Error, Result};

/// Draw a single uniform value on the half-open interval `(0, 1]`.
///
/// Zero is excluded so the value is always safe to pass to `ln`.
///
/// # Example
///
/// ```
/// use poisson_direct::uniform::{seeded_rng, uniform};
///
/// let mut rng = seeded_rng(42);
/// let u = uniform(&mut rng);
/// assert!(0.0 < u && u <= 1.0);
/// ```
#[inline]
pub fn uniform<G: Rng + ?Sized>(rng: &mut G) -> f64 {
    rng.sample(OpenClosed01)
}

/// Create an engine seeded from the operating system's entropy source.
pub fn entropy_rng() -> Result<SmallRng> {
    SmallRng::try_from_os_rng().map_err(|err| Error::EntropySource(Box::new(err)))
}

/// Create a reproducible engine from a fixed seed.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
