//! Monte Carlo Price Simulation
//!
//! Extract returns -> generate return matrix -> compound into paths.
//! Each call owns its generator state, so runs never share randomness.

use rand::rngs::StdRng;
use rand::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::generator::{generate_returns, validate_dimensions, ReturnModel};
use crate::market::PriceSeries;
use crate::paths::{build_paths, PathEnsemble};
use crate::report::{summarize, SimulationReport, Thresholds};
use crate::returns::daily_returns;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub days: usize,
    pub simulations: usize,
    pub model: ReturnModel,
    /// Fixed seed for reproducible runs; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 30,
            simulations: 1000,
            model: ReturnModel::Bootstrap,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.days, self.simulations)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Simulated price paths for `prices` using an explicit generator.
pub fn run_simulation(
    prices: &PriceSeries,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<PathEnsemble> {
    config.validate()?;
    let returns = daily_returns(prices.closes())?;
    let anchor = prices.last_price().ok_or_else(|| {
        SimError::InsufficientData("price series has no last close".to_string())
    })?;
    debug!(returns = returns.len(), anchor, "extracted daily returns");

    let matrix = generate_returns(&returns, config.model, config.days, config.simulations, rng)?;
    Ok(build_paths(&matrix, anchor))
}

/// Seeds a generator from `config` and runs the simulation with it.
pub fn simulate(prices: &PriceSeries, config: &SimulationConfig) -> Result<PathEnsemble> {
    let mut rng = config.rng();
    run_simulation(prices, config, &mut rng)
}

/// Simulation followed by the statistics report.
pub fn simulate_report(
    prices: &PriceSeries,
    config: &SimulationConfig,
    thresholds: &Thresholds,
) -> Result<SimulationReport> {
    thresholds.validate()?;
    info!(
        model = config.model.name(),
        days = config.days,
        simulations = config.simulations,
        observations = prices.len(),
        "running simulation"
    );
    let ensemble = simulate(prices, config)?;
    let report = summarize(&ensemble, thresholds)?;
    info!(prob_above_target = report.prob_above_target, "simulation finished");
    Ok(report)
}
