//! BRKGA evolutionary loop.
//!
//! [`BrkgaRunner`] drives a [`BrkgaOptimizer`] for a bounded number of
//! generations and keeps track of the best solution ever seen. Stopping
//! conditions (generation budget, stagnation, external cancellation) are
//! checked between generations; a generation in progress always completes.

use super::optimizer::BrkgaOptimizer;
use super::types::Decoder;
use crate::error::{BrkgaError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on the cost history preallocation.
const HISTORY_PREALLOC: usize = 4096;

/// Stopping conditions for [`BrkgaRunner`].
///
/// ```
/// use u_brkga::brkga::RunLimits;
///
/// let limits = RunLimits::new(200).with_stagnation_limit(25);
/// assert!(limits.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunLimits {
    /// Maximum number of generations.
    pub max_generations: usize,

    /// Generations with no improvement before stopping (0 to disable).
    pub stagnation_limit: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_generations: 500,
            stagnation_limit: 50,
        }
    }
}

impl RunLimits {
    /// Creates limits with the given generation budget and the default
    /// stagnation limit.
    pub fn new(max_generations: usize) -> Self {
        Self {
            max_generations,
            ..Self::default()
        }
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Validates the limits.
    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(BrkgaError::Configuration(
                "max_generations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Result of a BRKGA optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct BrkgaResult {
    /// The best random-key chromosome found.
    pub best_keys: Vec<f64>,

    /// Fitness of the best solution found during the whole run.
    pub best_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether terminated due to stagnation.
    pub stagnated: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best-ever fitness before the first generation and at the end of
    /// each generation.
    pub cost_history: Vec<f64>,
}

/// Executes the BRKGA loop on top of an optimizer.
pub struct BrkgaRunner;

impl BrkgaRunner {
    /// Runs until `limits` stop the loop.
    pub fn run<D: Decoder + ?Sized>(
        optimizer: &mut BrkgaOptimizer<'_, D>,
        limits: &RunLimits,
    ) -> Result<BrkgaResult> {
        Self::run_with_cancel(optimizer, limits, None)
    }

    /// Runs BRKGA with an optional cancellation token.
    ///
    /// If `cancel` is set, the loop stops before the next generation starts.
    /// A decode failure aborts the run and is returned as is; the optimizer
    /// keeps its last complete population.
    #[instrument(level = "debug", skip(optimizer, cancel))]
    pub fn run_with_cancel<D: Decoder + ?Sized>(
        optimizer: &mut BrkgaOptimizer<'_, D>,
        limits: &RunLimits,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BrkgaResult> {
        limits.validate()?;

        let sense = optimizer.sense();
        if optimizer.population().is_none() {
            optimizer.evolve()?;
        }
        let mut best = optimizer.best_individual()?.clone();

        let mut cost_history =
            Vec::with_capacity(limits.max_generations.min(HISTORY_PREALLOC) + 1);
        cost_history.push(best.fitness());

        let mut stagnation_counter = 0usize;
        let mut cancelled = false;
        let mut stagnated = false;
        let mut generations = 0usize;

        while generations < limits.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            optimizer.evolve()?;
            generations += 1;

            let current = optimizer.best_individual()?;
            if sense.is_better(current.fitness(), best.fitness()) {
                best = current.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            cost_history.push(best.fitness());

            if limits.stagnation_limit > 0 && stagnation_counter >= limits.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        tracing::debug!(
            generations,
            best = best.fitness(),
            stagnated,
            cancelled,
            "run finished"
        );

        let (chromosome, best_cost) = best.into_parts();
        Ok(BrkgaResult {
            best_keys: chromosome.into_keys(),
            best_cost,
            generations,
            stagnated,
            cancelled,
            cost_history,
        })
    }
}
