//! Sorted populations of scored individuals.

use super::chromosome::{Chromosome, ScoredIndividual};
use super::types::{Decoder, Sense};
use crate::error::{BrkgaError, DecodeError, Result};
use rand::Rng;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A population sorted best-first according to its [`Sense`].
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<ScoredIndividual>,
    sense: Sense,
}

impl Population {
    /// Generates `size` random chromosomes of `gene_count` keys, decodes
    /// them and sorts the result.
    ///
    /// Any decode failure aborts initialization.
    #[instrument(level = "debug", skip(decoder, rng))]
    pub fn initialize<D, R>(
        size: usize,
        gene_count: usize,
        decoder: &D,
        sense: Sense,
        parallel: bool,
        rng: &mut R,
    ) -> Result<Self>
    where
        D: Decoder + ?Sized,
        R: Rng,
    {
        let chromosomes: Vec<Chromosome> = (0..size)
            .map(|_| Chromosome::random(gene_count, rng))
            .collect();
        Self::from_chromosomes(chromosomes, decoder, sense, parallel)
    }

    /// Decodes a batch of chromosomes and sorts them into a population.
    pub fn from_chromosomes<D>(
        chromosomes: Vec<Chromosome>,
        decoder: &D,
        sense: Sense,
        parallel: bool,
    ) -> Result<Self>
    where
        D: Decoder + ?Sized,
    {
        let individuals = decode_batch(decoder, chromosomes, parallel)?;
        Ok(Self::from_scored(individuals, sense))
    }

    /// Sorts already-scored individuals into a population.
    pub(crate) fn from_scored(mut individuals: Vec<ScoredIndividual>, sense: Sense) -> Self {
        sort_individuals(&mut individuals, sense);
        Self { individuals, sense }
    }

    /// The best individual (index 0).
    pub fn best(&self) -> Result<&ScoredIndividual> {
        self.individuals.first().ok_or(BrkgaError::EmptyPopulation)
    }

    /// The `count` best individuals.
    pub fn elite(&self, count: usize) -> &[ScoredIndividual] {
        &self.individuals[..count.min(self.individuals.len())]
    }

    pub fn get(&self, index: usize) -> Option<&ScoredIndividual> {
        self.individuals.get(index)
    }

    pub fn individuals(&self) -> &[ScoredIndividual] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredIndividual> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Mean fitness across the population, `None` if empty.
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.individuals.is_empty() {
            return None;
        }
        let total: f64 = self.individuals.iter().map(|ind| ind.fitness()).sum();
        Some(total / self.individuals.len() as f64)
    }

    /// Replaces the individual at `position` and restores the ordering.
    pub(crate) fn replace(&mut self, position: usize, individual: ScoredIndividual) -> Result<()> {
        let len = self.individuals.len();
        let slot = self.individuals.get_mut(position).ok_or_else(|| {
            BrkgaError::InvalidArgument(format!(
                "position {position} out of range for population of {len}"
            ))
        })?;
        *slot = individual;
        sort_individuals(&mut self.individuals, self.sense);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a ScoredIndividual;
    type IntoIter = std::slice::Iter<'a, ScoredIndividual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

/// Stable sort, best first.
fn sort_individuals(individuals: &mut [ScoredIndividual], sense: Sense) {
    individuals.sort_by(|a, b| sense.compare(a.fitness(), b.fitness()));
}

/// Decodes one chromosome, rejecting a NaN fitness.
pub(crate) fn score<D: Decoder + ?Sized>(
    decoder: &D,
    chromosome: Chromosome,
) -> Result<ScoredIndividual> {
    let fitness = decoder.decode(chromosome.keys())?;
    if fitness.is_nan() {
        return Err(DecodeError::NotANumber.into());
    }
    Ok(ScoredIndividual::new(chromosome, fitness))
}

/// Decodes every chromosome of a batch.
///
/// With the `parallel` feature and `parallel == true` this is a rayon
/// fork-join; the collected result keeps input order and reports the
/// first failure in that order.
pub(crate) fn decode_batch<D: Decoder + ?Sized>(
    decoder: &D,
    chromosomes: Vec<Chromosome>,
    parallel: bool,
) -> Result<Vec<ScoredIndividual>> {
    #[cfg(feature = "parallel")]
    if parallel {
        let scored: Vec<Result<ScoredIndividual>> = chromosomes
            .into_par_iter()
            .map(|chr| score(decoder, chr))
            .collect();
        return scored.into_iter().collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    chromosomes
        .into_iter()
        .map(|chr| score(decoder, chr))
        .collect()
}
