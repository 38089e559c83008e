//! Summary statistics for checking a batch of samples against Poisson(λ).

use crate::{Error, Result};

/// Running sums used to compute the sample mean and variance in a single pass.
///
/// # Example
///
/// ```
/// use poisson_direct::stats::Moments;
///
/// let moments: Moments = [2, 4, 4, 4, 5, 5, 7, 9].into_iter().collect();
/// assert_eq!(moments.mean(), Some(5.0));
/// assert_eq!(moments.variance(), Some(4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u32) {
        let value = value as f64;
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Sample mean, or `None` if nothing was pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Population variance `E[X^2] - E[X]^2`, or `None` if nothing was pushed.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        Some(self.sum_sq / self.count as f64 - mean * mean)
    }
}

impl Extend<u32> for Moments {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<u32> for Moments {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut moments = Self::new();
        moments.extend(iter);
        moments
    }
}

/// Relative frequency of each count in `samples`.
///
/// All samples must be within `0..=upper_bound`, which sizes the count vector. The result is
/// indexed by count with trailing zeros removed, so it ends with a non-zero entry. An empty slice
/// gives an empty vector.
///
/// Returns [`Error::InvalidParameter`] on the first sample above `upper_bound`.
pub fn empirical_pmf(samples: &[u32], upper_bound: u32) -> Result<Vec<f64>> {
    let mut freq = vec![0u64; upper_bound as usize + 1];
    for &k in samples {
        let count = freq.get_mut(k as usize).ok_or(Error::InvalidParameter {
            name: "samples",
            value: k as f64,
            reason: "sample exceeds upper bound",
        })?;
        *count += 1;
    }

    let len = freq.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
    freq.truncate(len);

    let n = samples.len() as f64;
    Ok(freq.into_iter().map(|c| c as f64 / n).collect())
}

/// Natural logarithm of `k!`.
pub fn ln_factorial(k: u32) -> f64 {
    (2..=k).map(|i| (i as f64).ln()).sum()
}

/// Probability mass of `k` under Poisson(λ).
///
/// Computed in log space so it stays finite for rates where `exp(-λ)` alone would underflow.
pub fn poisson_pmf(lambda: f64, k: u32) -> f64 {
    (-lambda + k as f64 * lambda.ln() - ln_factorial(k)).exp()
}

/// Total variation distance between an empirical PMF and Poisson(λ).
///
/// Mass of the exact distribution beyond the empirical support is counted as mismatch.
pub fn total_variation(empirical: &[f64], lambda: f64) -> f64 {
    let (diff, covered) = empirical
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(diff, covered), (k, &p_hat)| {
            let p = poisson_pmf(lambda, k as u32);
            (diff + (p_hat - p).abs(), covered + p)
        });
    let tail = (1.0 - covered).max(0.0);
    0.5 * (diff + tail)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{sampler::sample_poisson_many, uniform::seeded_rng};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_moments_empty() {
        let moments = Moments::new();
        assert_eq!(moments.count(), 0);
        assert_eq!(moments.mean(), None);
        assert_eq!(moments.variance(), None);
    }

    #[test]
    fn test_moments() {
        let mut moments: Moments = [2, 4, 4, 4].into_iter().collect();
        moments.extend([5, 5, 7, 9]);
        assert_eq!(moments.count(), 8);
        assert_eq!(moments.sum(), 40.0);
        assert_eq!(moments.sum_sq(), 232.0);
        assert_eq!(moments.mean(), Some(5.0));
        assert_eq!(moments.variance(), Some(4.0));
    }

    #[test]
    fn test_empirical_pmf() {
        assert!(empirical_pmf(&[], 10).unwrap().is_empty());
        assert_eq!(
            empirical_pmf(&[0, 2, 2, 3], 3).unwrap(),
            &[0.25, 0.0, 0.5, 0.25]
        );
        // Trailing zeros below the bound are trimmed
        assert_eq!(empirical_pmf(&[1, 1], 100).unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn test_empirical_pmf_out_of_bound() {
        // A huge sample is rejected instead of sizing the count vector
        assert!(matches!(
            empirical_pmf(&[3, u32::MAX], 64),
            Err(Error::InvalidParameter { name: "samples", .. })
        ));
        assert!(empirical_pmf(&[4], 3).is_err());
    }

    #[test]
    fn test_ln_factorial() {
        assert_eq!(ln_factorial(0), 0.0);
        assert_eq!(ln_factorial(1), 0.0);
        assert!(approx_eq(ln_factorial(5), 120f64.ln()));
        assert!(approx_eq(ln_factorial(10), 3_628_800f64.ln()));
    }

    #[test]
    fn test_poisson_pmf() {
        let lambda: f64 = 8.7;
        assert!(approx_eq(poisson_pmf(lambda, 0), (-lambda).exp()));
        assert!(approx_eq(
            poisson_pmf(lambda, 3),
            (-lambda).exp() * lambda.powi(3) / 6.0
        ));
        let total: f64 = (0..100).map(|k| poisson_pmf(lambda, k)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        // Still representable where exp(-lambda) underflows
        assert!(poisson_pmf(800.0, 800) > 0.0);
    }

    #[test]
    fn test_total_variation() {
        let lambda = 3.0;
        let exact: Vec<f64> = (0..60).map(|k| poisson_pmf(lambda, k)).collect();
        assert!(total_variation(&exact, lambda) < 1e-9);
        assert!(approx_eq(total_variation(&[], lambda), 0.5));
        let mut far = vec![0.0; 60];
        far[59] = 1.0;
        assert!(approx_eq(total_variation(&far, lambda), 1.0));
    }

    #[test]
    fn test_sampled_pmf_close() {
        let lambda = 8.7;
        let samples = sample_poisson_many(&mut seeded_rng(9), lambda, 50_000).unwrap();
        let pmf = empirical_pmf(&samples, 100).unwrap();
        assert!((pmf.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(total_variation(&pmf, lambda) < 0.03);
    }
}
