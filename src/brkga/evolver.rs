//! One BRKGA generation transition.
//!
//! The next population is assembled from three groups:
//!
//! 1. **Elite**: the best `elite_count` individuals, copied as-is (no
//!    re-decoding).
//! 2. **Mutants**: `mutant_count` fresh random chromosomes.
//! 3. **Offspring**: biased multi-parent crossover. Each offspring draws
//!    `num_elite_parents` distinct elite parents and
//!    `total_parents - num_elite_parents` distinct non-elite parents, ranks
//!    them by fitness, and copies every gene from a parent drawn by the
//!    configured [`BiasFunction`](super::BiasFunction).
//!
//! All random draws happen before any decoding, so the random stream does
//! not depend on whether decoding runs in parallel.

use super::bias::roulette;
use super::chromosome::{Chromosome, ScoredIndividual};
use super::config::BrkgaParams;
use super::population::{decode_batch, Population};
use super::types::Decoder;
use crate::error::{BrkgaError, Result};
use rand::seq::index::sample;
use rand::Rng;
use tracing::instrument;

/// Produces successive generations for a fixed parameter set.
#[derive(Debug, Clone, Copy)]
pub struct Evolver<'p> {
    params: &'p BrkgaParams,
}

impl<'p> Evolver<'p> {
    /// Creates an evolver after validating `params`.
    pub fn new(params: &'p BrkgaParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Builds the generation following `current`.
    ///
    /// `current` must hold exactly `population_size` individuals. On error
    /// nothing is returned and `current` is left as it was.
    #[instrument(level = "debug", skip_all, fields(population = current.len()))]
    pub fn next_generation<D, R>(
        &self,
        current: &Population,
        decoder: &D,
        rng: &mut R,
    ) -> Result<Population>
    where
        D: Decoder + ?Sized,
        R: Rng,
    {
        let params = self.params;
        if current.len() != params.population_size {
            return Err(BrkgaError::InvalidArgument(format!(
                "population holds {} individuals, expected {}",
                current.len(),
                params.population_size
            )));
        }
        let Some(gene_count) = current.get(0).map(|ind| ind.chromosome().len()) else {
            return Err(BrkgaError::EmptyPopulation);
        };

        let elite_count = params.elite_count();
        let mutant_count = params.mutant_count();
        let offspring_count = params.offspring_count();

        let mut fresh: Vec<Chromosome> = Vec::with_capacity(mutant_count + offspring_count);

        // Mutants
        for _ in 0..mutant_count {
            fresh.push(Chromosome::random(gene_count, rng));
        }

        // Biased crossover
        let weights = params.bias_type.weights(params.total_parents);
        for _ in 0..offspring_count {
            fresh.push(self.crossover(current, &weights, gene_count, rng));
        }

        let decoded = decode_batch(decoder, fresh, params.parallel_decoding)?;

        let mut next: Vec<ScoredIndividual> = Vec::with_capacity(params.population_size);
        next.extend_from_slice(current.elite(elite_count));
        next.extend(decoded);

        let next = Population::from_scored(next, current.sense());
        tracing::trace!(
            best = next.best().map(|b| b.fitness()).unwrap_or(f64::NAN),
            "generation assembled"
        );
        Ok(next)
    }

    /// Builds one offspring from `total_parents` parents of `current`.
    ///
    /// `weights` holds the normalised bias weights of ranks `1..=total_parents`.
    fn crossover<R: Rng>(
        &self,
        current: &Population,
        weights: &[f64],
        gene_count: usize,
        rng: &mut R,
    ) -> Chromosome {
        let params = self.params;
        let individuals = current.individuals();
        let elite_count = params.elite_count();
        let non_elite_parents = params.total_parents - params.num_elite_parents;

        // Indices into the sorted population; sorting them orders the parents
        // by rank because the population itself is sorted best-first.
        let mut parents: Vec<usize> = Vec::with_capacity(params.total_parents);
        parents.extend(sample(rng, elite_count, params.num_elite_parents).into_iter());
        if non_elite_parents > 0 {
            let pool = individuals.len() - elite_count;
            parents.extend(
                sample(rng, pool, non_elite_parents)
                    .into_iter()
                    .map(|i| elite_count + i),
            );
        }
        parents.sort_unstable();

        let keys: Vec<f64> = (0..gene_count)
            .map(|gene| {
                let parent = parents[roulette(weights, rng)];
                individuals[parent].chromosome().keys()[gene]
            })
            .collect();

        Chromosome::from_trusted(keys)
    }
}
