//! Streaming sample statistics.
//!
//! [`RunningStats`] accumulates count, mean and the sum of squared deviations
//! (`M2`) one sample at a time using Welford's update, which avoids the
//! cancellation of the naive `Σx² − n·x̄²` formula at large sample counts.
//!
//! Accumulators built on disjoint subsets merge exactly with the pairwise
//! formula of Chan, Golub and LeVeque:
//!
//! ```text
//! n    = n_a + n_b
//! δ    = x̄_b − x̄_a
//! x̄    = x̄_a + δ·n_b / n
//! M2   = M2_a + M2_b + δ²·n_a·n_b / n
//! ```
//!
//! Merging is deterministic for a fixed merge order, which is what makes
//! parallel Monte Carlo estimates reproducible.

use serde::{Deserialize, Serialize};

/// Running count, mean and `M2` of a stream of samples.
///
/// # Examples
///
/// ```
/// use pricer_core::math::statistics::RunningStats;
///
/// let mut left = RunningStats::new();
/// let mut right = RunningStats::new();
/// for x in [2.0, 4.0] {
///     left.push(x);
/// }
/// for x in [4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     right.push(x);
/// }
/// left.merge(&right);
///
/// assert_eq!(left.count(), 8);
/// assert!((left.mean() - 5.0).abs() < 1e-12);
/// assert!((left.population_variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    /// Number of samples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean (0 when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean.
    #[inline]
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Unbiased sample variance, `M2 / (n − 1)`; `None` below two samples.
    pub fn sample_variance(&self) -> Option<f64> {
        // M2 can drift a hair below zero for constant samples
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as f64).max(0.0))
    }

    /// Population variance, `M2 / n`; `None` when empty.
    pub fn population_variance(&self) -> Option<f64> {
        (self.count >= 1).then(|| (self.m2 / self.count as f64).max(0.0))
    }

    /// Sample standard deviation.
    pub fn sample_std(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Standard error of the mean, `s / √n`; `None` below two samples.
    pub fn std_error(&self) -> Option<f64> {
        self.sample_std().map(|s| s / (self.count as f64).sqrt())
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = RunningStats::new();
        stats.extend(iter);
        stats
    }
}
