//! Random-key chromosomes and their scored form.

use crate::error::{BrkgaError, Result};
use rand::Rng;

/// A random-key chromosome: a fixed-length vector of keys in `[0, 1)`.
///
/// Chromosomes are read-only once built. The engine never compares
/// chromosomes directly; ordering always goes through decoded fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    keys: Vec<f64>,
}

impl Chromosome {
    /// Builds a chromosome from caller-supplied keys.
    ///
    /// Fails with [`BrkgaError::InvalidChromosome`] if any key is outside
    /// `[0, 1)` or not finite.
    ///
    /// ```
    /// use u_brkga::brkga::Chromosome;
    ///
    /// assert!(Chromosome::new(vec![0.0, 0.5, 0.999]).is_ok());
    /// assert!(Chromosome::new(vec![0.5, 1.0]).is_err());
    /// ```
    pub fn new(keys: Vec<f64>) -> Result<Self> {
        if let Some((i, k)) = keys
            .iter()
            .enumerate()
            .find(|(_, &k)| !(0.0..1.0).contains(&k))
        {
            return Err(BrkgaError::InvalidChromosome(format!(
                "key {i} is {k}, expected a value in [0, 1)"
            )));
        }
        Ok(Self { keys })
    }

    /// Draws `len` uniform keys in `[0, 1)`.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let keys = (0..len).map(|_| rng.random::<f64>()).collect();
        Self { keys }
    }

    /// Assembles a chromosome from keys already known to lie in `[0, 1)`.
    pub(crate) fn from_trusted(keys: Vec<f64>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<f64> {
        self.keys
    }
}

impl AsRef<[f64]> for Chromosome {
    fn as_ref(&self) -> &[f64] {
        &self.keys
    }
}

/// A chromosome paired with the fitness its decoder assigned.
///
/// The pair is only ever built from a decode result, and neither half can
/// be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIndividual {
    chromosome: Chromosome,
    fitness: f64,
}

impl ScoredIndividual {
    pub(crate) fn new(chromosome: Chromosome, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_parts(self) -> (Chromosome, f64) {
        (self.chromosome, self.fitness)
    }
}
