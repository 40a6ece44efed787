//! Core trait and optimization sense for BRKGA.

use crate::error::DecodeError;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoder trait for BRKGA.
///
/// This is the **only** trait a user must implement to use BRKGA.
/// It maps a random-key chromosome (a slice of `f64` in `[0, 1)`)
/// to a fitness value. Whether lower or higher is better is decided by the
/// [`Sense`] given to the optimizer, not by the decoder.
///
/// Decoding must be deterministic for a given chromosome. A decoder that
/// cannot score a chromosome returns a [`DecodeError`] instead of a fitness;
/// the generation that produced the chromosome is then discarded.
///
/// The trait is object safe, so `&dyn Decoder` works wherever a decoder is
/// expected. Closures of the right shape implement it directly.
///
/// # Examples
///
/// ```
/// use u_brkga::brkga::Decoder;
/// use u_brkga::DecodeError;
///
/// struct KnapsackDecoder { weights: Vec<f64>, values: Vec<f64>, capacity: f64 }
///
/// impl Decoder for KnapsackDecoder {
///     fn decode(&self, keys: &[f64]) -> Result<f64, DecodeError> {
///         DecodeError::check_length(self.weights.len(), keys)?;
///         // keys[i] > 0.5 means include item i
///         let (total_w, total_v) = keys.iter().enumerate()
///             .filter(|(_, &k)| k > 0.5)
///             .fold((0.0, 0.0), |(w, v), (i, _)| (w + self.weights[i], v + self.values[i]));
///         Ok(if total_w > self.capacity { f64::INFINITY } else { -total_v })
///     }
/// }
/// ```
///
/// # References
///
/// Bean (1994), Goncalves & Resende (2011)
pub trait Decoder: Send + Sync {
    /// Decodes a random-key chromosome and returns its fitness.
    ///
    /// # Arguments
    /// * `keys` - A slice of `f64` values in `[0.0, 1.0)`. Its length is the
    ///   chromosome length the optimizer was built with.
    fn decode(&self, keys: &[f64]) -> Result<f64, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&[f64]) -> Result<f64, DecodeError> + Send + Sync,
{
    fn decode(&self, keys: &[f64]) -> Result<f64, DecodeError> {
        self(keys)
    }
}

/// Optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sense {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Sense {
    /// Orders two fitness values so that the better one comes first.
    ///
    /// Used as the comparator of every population sort.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Sense::Minimize => a.total_cmp(&b),
            Sense::Maximize => b.total_cmp(&a),
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Sense::Minimize => candidate < incumbent,
            Sense::Maximize => candidate > incumbent,
        }
    }
}
