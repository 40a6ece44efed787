//! Biased Random-Key Genetic Algorithm engine.
//!
//! Chromosomes are vectors of random keys in `[0, 1)`. A problem-specific
//! [`Decoder`](brkga::Decoder) turns keys into a fitness; the engine does
//! everything else:
//!
//! - **Elite carryover**: the best fraction of each generation survives
//!   unchanged.
//! - **Mutants**: fresh random chromosomes keep the population diverse.
//! - **Biased crossover**: offspring take each gene from one of several
//!   parents, favouring better-ranked ones according to a bias function.
//!
//! Runs are fully reproducible: the random source is seeded explicitly and
//! owned by the optimizer.
//!
//! # Quick start
//!
//! ```
//! use u_brkga::brkga::{BrkgaOptimizer, BrkgaParams, BrkgaRunner, RunLimits, Sense};
//! use u_brkga::DecodeError;
//!
//! let decoder = |keys: &[f64]| -> Result<f64, DecodeError> {
//!     Ok(keys.iter().map(|k| (k - 0.25).powi(2)).sum())
//! };
//!
//! let params = BrkgaParams::new().with_population_size(60);
//! let mut brkga = BrkgaOptimizer::new(&decoder, Sense::Minimize, 4, params, 7, false)?;
//! let result = BrkgaRunner::run(&mut brkga, &RunLimits::new(100))?;
//! assert!(result.best_cost < 0.05);
//! # Ok::<(), u_brkga::BrkgaError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: decode new chromosomes with rayon when
//!   [`BrkgaParams::parallel_decoding`](brkga::BrkgaParams::parallel_decoding)
//!   is set.
//! - `serde`: `Serialize`/`Deserialize` for parameter types.

pub mod brkga;
pub mod error;

pub use error::{BrkgaError, DecodeError, Result};
