//! BRKGA parameters.

use super::bias::BiasFunction;
use crate::error::{BrkgaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance applied before rounding `population_size × fraction` up, so
/// that float noise such as `400 × 0.30 = 120.00000000000001` still counts
/// as 120.
const COUNT_EPSILON: f64 = 1e-9;

fn fraction_count(population_size: usize, fraction: f64) -> usize {
    let exact = population_size as f64 * fraction;
    (exact - COUNT_EPSILON).ceil().max(0.0) as usize
}

/// Parameters of a BRKGA run.
///
/// # Parameters
///
/// The two population fractions must satisfy:
/// `elite_percentage + mutants_percentage < 1.0`
///
/// The remaining slots are filled by crossover offspring, each produced
/// from `total_parents` parents of which `num_elite_parents` come from the
/// elite set.
///
/// Setters store values as given; [`validate`](Self::validate) reports any
/// invalid combination.
///
/// # Examples
///
/// ```
/// use u_brkga::brkga::{BiasFunction, BrkgaParams};
///
/// let params = BrkgaParams::new()
///     .with_population_size(400)
///     .with_elite_percentage(0.30)
///     .with_mutants_percentage(0.05)
///     .with_num_elite_parents(1)
///     .with_total_parents(2)
///     .with_bias_type(BiasFunction::LogInverse);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.elite_count(), 120);
/// assert_eq!(params.mutant_count(), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrkgaParams {
    /// Total population size.
    pub population_size: usize,

    /// Fraction of population preserved as elite (0.10–0.30 typical).
    pub elite_percentage: f64,

    /// Fraction of population replaced by random mutants (0.05–0.30 typical).
    pub mutants_percentage: f64,

    /// Parents drawn from the elite set for each offspring.
    pub num_elite_parents: usize,

    /// Parents per offspring, elite and non-elite together.
    pub total_parents: usize,

    /// Rank → weight mapping used during crossover.
    pub bias_type: BiasFunction,

    /// Whether to decode new chromosomes in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature; results are identical
    /// either way.
    pub parallel_decoding: bool,
}

impl Default for BrkgaParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_percentage: 0.20,
            mutants_percentage: 0.15,
            num_elite_parents: 1,
            total_parents: 2,
            bias_type: BiasFunction::default(),
            parallel_decoding: false,
        }
    }
}

impl BrkgaParams {
    /// Creates parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_elite_percentage(mut self, f: f64) -> Self {
        self.elite_percentage = f;
        self
    }

    pub fn with_mutants_percentage(mut self, f: f64) -> Self {
        self.mutants_percentage = f;
        self
    }

    pub fn with_num_elite_parents(mut self, n: usize) -> Self {
        self.num_elite_parents = n;
        self
    }

    pub fn with_total_parents(mut self, n: usize) -> Self {
        self.total_parents = n;
        self
    }

    pub fn with_bias_type(mut self, bias: BiasFunction) -> Self {
        self.bias_type = bias;
        self
    }

    pub fn with_parallel_decoding(mut self, parallel: bool) -> Self {
        self.parallel_decoding = parallel;
        self
    }

    /// Size of the elite set: `ceil(population_size × elite_percentage)`,
    /// at least 1.
    pub fn elite_count(&self) -> usize {
        fraction_count(self.population_size, self.elite_percentage).max(1)
    }

    /// Number of mutants per generation:
    /// `ceil(population_size × mutants_percentage)`.
    pub fn mutant_count(&self) -> usize {
        fraction_count(self.population_size, self.mutants_percentage)
    }

    /// Number of crossover offspring per generation.
    pub fn offspring_count(&self) -> usize {
        self.population_size
            .saturating_sub(self.elite_count() + self.mutant_count())
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(BrkgaError::Configuration(msg));

        if self.population_size == 0 {
            return fail("population_size must be at least 1".into());
        }
        if !(self.elite_percentage > 0.0 && self.elite_percentage < 1.0) {
            return fail(format!(
                "elite_percentage ({}) must be in (0, 1)",
                self.elite_percentage
            ));
        }
        if !(self.mutants_percentage > 0.0 && self.mutants_percentage < 1.0) {
            return fail(format!(
                "mutants_percentage ({}) must be in (0, 1)",
                self.mutants_percentage
            ));
        }
        if self.elite_percentage + self.mutants_percentage >= 1.0 {
            return fail(format!(
                "elite_percentage ({}) + mutants_percentage ({}) must be < 1.0",
                self.elite_percentage, self.mutants_percentage
            ));
        }
        if self.total_parents < 2 {
            return fail(format!(
                "total_parents ({}) must be at least 2",
                self.total_parents
            ));
        }
        if self.num_elite_parents == 0 {
            return fail("num_elite_parents must be at least 1".into());
        }
        if self.num_elite_parents > self.total_parents {
            return fail(format!(
                "num_elite_parents ({}) must not exceed total_parents ({})",
                self.num_elite_parents, self.total_parents
            ));
        }

        let elite = self.elite_count();
        let mutants = self.mutant_count();
        if elite + mutants > self.population_size {
            return fail(format!(
                "elite ({elite}) + mutant ({mutants}) individuals exceed population_size ({})",
                self.population_size
            ));
        }
        if self.num_elite_parents > elite {
            return fail(format!(
                "num_elite_parents ({}) exceeds the elite set size ({elite})",
                self.num_elite_parents
            ));
        }
        let non_elite_parents = self.total_parents - self.num_elite_parents;
        if self.offspring_count() > 0 && non_elite_parents > self.population_size - elite {
            return fail(format!(
                "{non_elite_parents} non-elite parents requested but only {} non-elite individuals exist",
                self.population_size - elite
            ));
        }
        Ok(())
    }
}
