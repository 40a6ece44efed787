//! Rank-based bias functions for multi-parent crossover.
//!
//! During crossover the chosen parents are ranked among themselves by
//! fitness (rank 1 = best). A [`BiasFunction`] turns each rank into a
//! weight; every gene of the offspring is then copied from one parent
//! drawn with probability proportional to its weight.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of the rank → weight mapping.
///
/// All shapes are non-increasing in rank, so better parents are never less
/// likely to pass on a gene than worse ones.
///
/// # Examples
///
/// ```
/// use u_brkga::brkga::BiasFunction;
///
/// let w = BiasFunction::Linear.weights(3);
/// assert!((w[0] - 6.0 / 11.0).abs() < 1e-12);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BiasFunction {
    /// Every parent has the same weight (`1 / total_parents`).
    Constant,
    /// `r^-3`
    Cubic,
    /// `e^-r`
    Exponential,
    /// `1 / r`
    Linear,
    /// `1 / ln(1 + r)`
    #[default]
    LogInverse,
    /// `r^-2`
    Quadratic,
}

impl BiasFunction {
    /// Unnormalised weight of the parent at 1-based `rank` among
    /// `total_parents`.
    pub fn weight(self, rank: usize, total_parents: usize) -> f64 {
        let r = rank as f64;
        match self {
            BiasFunction::Constant => 1.0 / total_parents as f64,
            BiasFunction::Cubic => r.powi(-3),
            BiasFunction::Exponential => (-r).exp(),
            BiasFunction::Linear => 1.0 / r,
            BiasFunction::LogInverse => 1.0 / (1.0 + r).ln(),
            BiasFunction::Quadratic => r.powi(-2),
        }
    }

    /// Weights of ranks `1..=total_parents`, normalised to sum to 1.
    pub fn weights(self, total_parents: usize) -> Vec<f64> {
        let raw: Vec<f64> = (1..=total_parents)
            .map(|rank| self.weight(rank, total_parents))
            .collect();
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / total).collect()
    }
}

/// Roulette wheel over a normalised weight vector; returns the chosen index.
pub(crate) fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let threshold: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    weights.len() - 1 // floating-point fallback
}
