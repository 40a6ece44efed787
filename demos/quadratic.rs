//! Minimizes `(g0 * 10 - 5)^2` over two random keys and prints progress.
//!
//! Run with `cargo run --example quadratic`.

use std::process::ExitCode;
use tracing::Level;
use u_brkga::brkga::{BiasFunction, BrkgaOptimizer, BrkgaParams, Decoder, Sense};
use u_brkga::DecodeError;

const CHROMOSOME_LENGTH: usize = 2;
const GENERATIONS: usize = 50;
const SEED: u64 = 42;

struct QuadraticDecoder;

impl Decoder for QuadraticDecoder {
    fn decode(&self, keys: &[f64]) -> Result<f64, DecodeError> {
        DecodeError::check_length(CHROMOSOME_LENGTH, keys)?;
        // map the first key from [0, 1) to [-5, 5)
        let x = keys[0] * 10.0 - 5.0;
        Ok(x * x)
    }
}

fn format_keys(keys: &[f64]) -> String {
    keys.iter()
        .map(|k| format!("{k:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run() -> u_brkga::Result<()> {
    let params = BrkgaParams::new()
        .with_population_size(400)
        .with_elite_percentage(0.30)
        .with_mutants_percentage(0.05)
        .with_num_elite_parents(1)
        .with_total_parents(2)
        .with_bias_type(BiasFunction::LogInverse);

    println!(
        "Pop={} | elite%={} | elite_set={} | elite_parents={} | total_parents={} | CHR={}",
        params.population_size,
        params.elite_percentage,
        params.elite_count(),
        params.num_elite_parents,
        params.total_parents,
        CHROMOSOME_LENGTH
    );

    let decoder = QuadraticDecoder;
    let mut brkga =
        BrkgaOptimizer::new(&decoder, Sense::Minimize, CHROMOSOME_LENGTH, params, SEED, false)?;
    brkga.evolve()?;

    let mut best = brkga.best_fitness()?;
    println!("Initial fitness: {best}");
    println!("Initial chromosome: {}", format_keys(brkga.best_chromosome()?.keys()));

    for generation in 1..=GENERATIONS {
        brkga.evolve()?;
        let current = brkga.best_fitness()?;
        if current < best {
            best = current;
        }
        if generation % 10 == 0 {
            println!("Generation {generation} | Best = {best}");
        }
    }

    println!("\nFinished. Best value found: {best}");
    println!("Best chromosome: {}", format_keys(brkga.best_chromosome()?.keys()));
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
