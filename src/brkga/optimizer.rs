//! The BRKGA optimizer facade.

use super::chromosome::{Chromosome, ScoredIndividual};
use super::config::BrkgaParams;
use super::evolver::Evolver;
use super::population::{score, Population};
use super::types::{Decoder, Sense};
use crate::error::{BrkgaError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tracing::instrument;

/// Owns a BRKGA run: parameters, the seeded random source and the current
/// population. The decoder is borrowed for the optimizer's lifetime.
///
/// Every call to [`evolve`](Self::evolve) replaces the population with the
/// next generation. Two optimizers built from the same parameters and seed
/// produce identical populations generation after generation.
///
/// # Examples
///
/// ```
/// use u_brkga::brkga::{BrkgaOptimizer, BrkgaParams, Sense};
/// use u_brkga::DecodeError;
///
/// let decoder = |keys: &[f64]| -> Result<f64, DecodeError> {
///     DecodeError::check_length(2, keys)?;
///     let x = keys[0] * 10.0 - 5.0;
///     Ok(x * x)
/// };
///
/// let params = BrkgaParams::new().with_population_size(50);
/// let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Minimize, 2, params, 42, false)?;
/// brkga.evolve_for(20)?;
/// assert!(brkga.best_fitness()? < 1.0);
/// # Ok::<(), u_brkga::BrkgaError>(())
/// ```
pub struct BrkgaOptimizer<'d, D: Decoder + ?Sized> {
    decoder: &'d D,
    sense: Sense,
    chromosome_length: usize,
    params: BrkgaParams,
    rng: StdRng,
    population: Option<Population>,
    generation: usize,
    verbose: bool,
}

// The decoder is caller-defined and need not implement `Debug`.
impl<D: Decoder + ?Sized> fmt::Debug for BrkgaOptimizer<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrkgaOptimizer")
            .field("sense", &self.sense)
            .field("chromosome_length", &self.chromosome_length)
            .field("params", &self.params)
            .field("population", &self.population)
            .field("generation", &self.generation)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl<'d, D: Decoder + ?Sized> BrkgaOptimizer<'d, D> {
    /// Validates the parameters, seeds the random source and builds the
    /// initial population.
    ///
    /// Fails with [`BrkgaError::Configuration`] on invalid parameters and
    /// with [`BrkgaError::Decode`] if the decoder rejects an initial
    /// chromosome.
    #[instrument(level = "debug", skip(decoder, params), fields(population_size = params.population_size))]
    pub fn new(
        decoder: &'d D,
        sense: Sense,
        chromosome_length: usize,
        params: BrkgaParams,
        seed: u64,
        verbose: bool,
    ) -> Result<Self> {
        params.validate()?;
        if chromosome_length == 0 {
            return Err(BrkgaError::Configuration(
                "chromosome_length must be at least 1".into(),
            ));
        }

        let mut optimizer = Self {
            decoder,
            sense,
            chromosome_length,
            params,
            rng: StdRng::seed_from_u64(seed),
            population: None,
            generation: 0,
            verbose,
        };
        optimizer.initialize()?;

        if verbose {
            tracing::info!(
                population_size = optimizer.params.population_size,
                elite = optimizer.params.elite_count(),
                mutants = optimizer.params.mutant_count(),
                elite_parents = optimizer.params.num_elite_parents,
                total_parents = optimizer.params.total_parents,
                bias = ?optimizer.params.bias_type,
                chromosome_length,
                "BRKGA initialized"
            );
        }
        Ok(optimizer)
    }

    fn initialize(&mut self) -> Result<()> {
        let population = Population::initialize(
            self.params.population_size,
            self.chromosome_length,
            self.decoder,
            self.sense,
            self.params.parallel_decoding,
            &mut self.rng,
        )?;
        self.population = Some(population);
        Ok(())
    }

    /// Advances one generation.
    ///
    /// If the optimizer holds no population (after a failed
    /// [`reset`](Self::reset)), this initializes one instead. On error the
    /// previous population is kept.
    pub fn evolve(&mut self) -> Result<()> {
        let Some(current) = self.population.as_ref() else {
            return self.initialize();
        };

        let next = Evolver::new(&self.params)?.next_generation(
            current,
            self.decoder,
            &mut self.rng,
        )?;
        self.population = Some(next);
        self.generation += 1;
        self.report();
        Ok(())
    }

    /// Calls [`evolve`](Self::evolve) `generations` times, stopping at the
    /// first error.
    pub fn evolve_for(&mut self, generations: usize) -> Result<()> {
        for _ in 0..generations {
            self.evolve()?;
        }
        Ok(())
    }

    fn report(&self) {
        let Some(population) = self.population.as_ref() else {
            return;
        };
        let Ok(best) = population.best() else {
            return;
        };
        if self.verbose {
            tracing::info!(
                generation = self.generation,
                best = best.fitness(),
                mean = ?population.mean_fitness(),
                "generation complete"
            );
        } else {
            tracing::debug!(generation = self.generation, best = best.fitness(), "generation complete");
        }
    }

    /// Fitness of the best individual in the current population.
    pub fn best_fitness(&self) -> Result<f64> {
        self.best_individual().map(ScoredIndividual::fitness)
    }

    /// Chromosome of the best individual in the current population.
    pub fn best_chromosome(&self) -> Result<&Chromosome> {
        self.best_individual().map(ScoredIndividual::chromosome)
    }

    pub fn best_individual(&self) -> Result<&ScoredIndividual> {
        self.population
            .as_ref()
            .ok_or(BrkgaError::EmptyPopulation)?
            .best()
    }

    /// Discards the population and draws a new one from the current random
    /// stream. The generation counter restarts at zero.
    ///
    /// If initialization fails the optimizer is left without a population.
    pub fn reset(&mut self) -> Result<()> {
        self.population = None;
        self.generation = 0;
        self.initialize()
    }

    /// Decodes `chromosome` and puts it in place of the individual at
    /// `position` (0 = best) of the current population.
    pub fn inject_chromosome(&mut self, chromosome: Chromosome, position: usize) -> Result<()> {
        if chromosome.len() != self.chromosome_length {
            return Err(BrkgaError::InvalidChromosome(format!(
                "chromosome has {} keys, expected {}",
                chromosome.len(),
                self.chromosome_length
            )));
        }
        let population = self.population.as_mut().ok_or(BrkgaError::EmptyPopulation)?;
        if position >= population.len() {
            return Err(BrkgaError::InvalidArgument(format!(
                "position {position} out of range for population of {}",
                population.len()
            )));
        }

        let individual = score(self.decoder, chromosome)?;
        population.replace(position, individual)
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// Number of generations evolved since construction or the last reset.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn params(&self) -> &BrkgaParams {
        &self.params
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn quadratic(keys: &[f64]) -> std::result::Result<f64, DecodeError> {
        DecodeError::check_length(2, keys)?;
        let x = keys[0] * 10.0 - 5.0;
        Ok(x * x)
    }

    fn params() -> BrkgaParams {
        BrkgaParams::new()
            .with_population_size(60)
            .with_elite_percentage(0.2)
            .with_mutants_percentage(0.1)
    }

    #[test]
    fn test_construct_initializes() {
        let brkga = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, params(), 42, false).unwrap();
        assert_eq!(brkga.generation(), 0);
        assert_eq!(brkga.population().unwrap().len(), 60);
        assert!(brkga.best_fitness().unwrap() >= 0.0);
        assert_eq!(brkga.best_chromosome().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_config() {
        let bad = params().with_num_elite_parents(3).with_total_parents(2);
        assert!(matches!(
            BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, bad, 42, false),
            Err(BrkgaError::Configuration(_))
        ));
        assert!(matches!(
            BrkgaOptimizer::new(&quadratic, Sense::Minimize, 0, params(), 42, false),
            Err(BrkgaError::Configuration(_))
        ));
    }

    #[test]
    fn test_length_mismatch_fails_construction() {
        let err = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 3, params(), 42, false).unwrap_err();
        assert_eq!(
            err,
            BrkgaError::Decode(DecodeError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_evolve_improves() {
        let mut brkga = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, params(), 42, false).unwrap();
        let initial = brkga.best_fitness().unwrap();
        brkga.evolve_for(30).unwrap();
        assert_eq!(brkga.generation(), 30);
        let last = brkga.best_fitness().unwrap();
        assert!(last <= initial);
        assert!(last < 0.05, "expected near 0, got {last}");
    }

    #[test]
    fn test_maximize() {
        let decoder = |keys: &[f64]| -> std::result::Result<f64, DecodeError> {
            Ok(keys.iter().sum())
        };
        let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Maximize, 5, params(), 7, false).unwrap();
        brkga.evolve_for(40).unwrap();
        assert!(brkga.best_fitness().unwrap() > 4.0);
    }

    #[test]
    fn test_failed_evolve_keeps_population() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let fail = AtomicBool::new(false);
        let decoder = |keys: &[f64]| {
            if fail.load(Ordering::Relaxed) {
                Err(DecodeError::Rejected("switched off".into()))
            } else {
                quadratic(keys)
            }
        };
        let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Minimize, 2, params(), 42, false).unwrap();
        brkga.evolve().unwrap();
        let before = brkga.population().cloned();

        fail.store(true, Ordering::Relaxed);
        assert!(matches!(brkga.evolve(), Err(BrkgaError::Decode(_))));
        assert_eq!(brkga.population().cloned(), before);
        assert_eq!(brkga.generation(), 1);
    }

    #[test]
    fn test_reset_failure_then_recover() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let fail = AtomicBool::new(false);
        let decoder = |keys: &[f64]| {
            if fail.load(Ordering::Relaxed) {
                Err(DecodeError::Rejected("switched off".into()))
            } else {
                quadratic(keys)
            }
        };
        let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Minimize, 2, params(), 42, false).unwrap();
        brkga.evolve_for(3).unwrap();

        fail.store(true, Ordering::Relaxed);
        assert!(brkga.reset().is_err());
        assert_eq!(brkga.best_fitness(), Err(BrkgaError::EmptyPopulation));
        assert!(matches!(brkga.best_chromosome(), Err(BrkgaError::EmptyPopulation)));

        fail.store(false, Ordering::Relaxed);
        brkga.evolve().unwrap();
        assert_eq!(brkga.generation(), 0);
        assert!(brkga.best_fitness().is_ok());
    }

    #[test]
    fn test_inject_chromosome() {
        let mut brkga = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, params(), 42, false).unwrap();
        let optimum = Chromosome::new(vec![0.5, 0.1]).unwrap();
        brkga.inject_chromosome(optimum.clone(), 59).unwrap();
        assert_eq!(brkga.best_fitness().unwrap(), 0.0);
        assert_eq!(brkga.best_chromosome().unwrap(), &optimum);
        assert_eq!(brkga.population().unwrap().len(), 60);

        assert!(matches!(
            brkga.inject_chromosome(Chromosome::new(vec![0.5]).unwrap(), 0),
            Err(BrkgaError::InvalidChromosome(_))
        ));
        assert!(matches!(
            brkga.inject_chromosome(optimum, 60),
            Err(BrkgaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_inject_rejects_nan_fitness() {
        let decoder = |keys: &[f64]| {
            if keys[0] == 0.0 {
                Ok(f64::NAN)
            } else {
                quadratic(keys)
            }
        };
        let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Minimize, 2, params(), 42, false).unwrap();
        let before = brkga.population().unwrap().clone();

        let err = brkga
            .inject_chromosome(Chromosome::new(vec![0.0, 0.5]).unwrap(), 0)
            .unwrap_err();
        assert!(matches!(err, BrkgaError::Decode(DecodeError::NotANumber)));
        assert_eq!(brkga.population().unwrap(), &before);
    }

    /// A decoder type that does not implement `Debug`.
    struct Opaque;

    impl Decoder for Opaque {
        fn decode(&self, keys: &[f64]) -> std::result::Result<f64, DecodeError> {
            quadratic(keys)
        }
    }

    #[test]
    fn test_debug_without_debug_decoder() {
        let brkga = BrkgaOptimizer::new(&Opaque, Sense::Minimize, 2, params(), 42, false).unwrap();
        let text = format!("{brkga:?}");
        assert!(text.starts_with("BrkgaOptimizer"), "{text}");
        assert!(text.contains("generation: 0"), "{text}");

        let err = BrkgaOptimizer::new(&Opaque, Sense::Minimize, 0, params(), 42, false).unwrap_err();
        assert!(matches!(err, BrkgaError::Configuration(_)));
    }

    #[test]
    fn test_dyn_decoder() {
        let decoder: &dyn Decoder = &quadratic;
        let mut brkga = BrkgaOptimizer::new(decoder, Sense::Minimize, 2, params(), 42, false).unwrap();
        brkga.evolve().unwrap();
        assert!(brkga.best_fitness().is_ok());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = params();
        let parallel = params().with_parallel_decoding(true);
        let mut a = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, sequential, 5, false).unwrap();
        let mut b = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, parallel, 5, false).unwrap();
        a.evolve_for(10).unwrap();
        b.evolve_for(10).unwrap();
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn test_same_seed_same_populations() {
        let mut a = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, params(), 99, false).unwrap();
        let mut b = BrkgaOptimizer::new(&quadratic, Sense::Minimize, 2, params(), 99, false).unwrap();
        for _ in 0..10 {
            a.evolve().unwrap();
            b.evolve().unwrap();
            assert_eq!(a.population(), b.population());
        }
    }
}
