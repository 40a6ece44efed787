//! Biased Random-Key Genetic Algorithm (BRKGA).
//!
//! BRKGA separates the evolutionary engine from the problem by using a
//! random-key representation: chromosomes are vectors of `f64` in `[0, 1)`,
//! and a user-provided **decoder** maps keys to a solution and its fitness.
//!
//! The engine handles population management (elite copy, mutant injection,
//! rank-biased multi-parent crossover) entirely; the user implements only
//! [`Decoder`].
//!
//! # Key Types
//!
//! - [`BrkgaParams`]: population size, elite/mutant fractions, parent counts
//! - [`BrkgaOptimizer`]: owns one run and advances it with `evolve()`
//! - [`BrkgaRunner`]: bounded loop with stagnation and cancellation
//! - [`Evolver`]: a single generation transition
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"
//! - Goncalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization", *J. Heuristics* 17(5), 487–525
//! - Andrade, Toso, Goncalves & Resende (2021), "The Multi-Parent Biased
//!   Random-Key Genetic Algorithm with Implicit Path-Relinking and its
//!   real-world applications", *EJOR* 289(1), 17–30

mod bias;
mod chromosome;
mod config;
mod evolver;
mod optimizer;
mod population;
mod runner;
mod types;

pub use bias::BiasFunction;
pub use chromosome::{Chromosome, ScoredIndividual};
pub use config::BrkgaParams;
pub use evolver::Evolver;
pub use optimizer::BrkgaOptimizer;
pub use population::Population;
pub use runner::{BrkgaResult, BrkgaRunner, RunLimits};
pub use types::{Decoder, Sense};
