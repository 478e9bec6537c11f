//! Simulated Daily Returns
//!
//! Draws a (days x simulations) matrix of synthetic daily returns from the
//! empirical return series.
//!
//! ## Return Models
//! - Bootstrap: resample observed returns uniformly, with replacement
//! - Normal: i.i.d. draws from N(sample mean, sample variance)
//!
//! The normal model can draw returns below -100%. Those are kept as drawn,
//! so paths built from them may reach zero or negative prices.

use clap::ValueEnum;
use rand::distributions::Uniform;
use rand::prelude::*;
use rand_distr::Normal;
use tracing::debug;

use crate::error::{Result, SimError};
use crate::matrix::Matrix;
use crate::returns::ReturnStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ReturnModel {
    #[default]
    Bootstrap,
    Normal,
}

impl ReturnModel {
    pub fn all() -> Vec<Self> {
        vec![Self::Bootstrap, Self::Normal]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Normal => "normal",
        }
    }
}

/// Simulated daily returns, rows = days, columns = simulation runs.
pub type ReturnMatrix = Matrix;

pub(crate) fn validate_dimensions(days: usize, simulations: usize) -> Result<()> {
    if days == 0 {
        return Err(SimError::InvalidParameter(
            "days must be a positive integer".to_string(),
        ));
    }
    if simulations == 0 {
        return Err(SimError::InvalidParameter(
            "simulations must be a positive integer".to_string(),
        ));
    }
    days.checked_mul(simulations).map(|_| ()).ok_or_else(|| {
        SimError::InvalidParameter(format!(
            "{days} days x {simulations} simulations does not fit in memory"
        ))
    })
}

/// Builds the full return matrix in one go; nothing is returned on failure.
pub fn generate_returns(
    returns: &[f64],
    model: ReturnModel,
    days: usize,
    simulations: usize,
    rng: &mut impl Rng,
) -> Result<ReturnMatrix> {
    validate_dimensions(days, simulations)?;
    if returns.is_empty() {
        return Err(SimError::EmptyReturns(format!(
            "cannot draw {} returns from an empty series",
            model.name()
        )));
    }

    let cells = days * simulations;
    debug!(model = model.name(), days, simulations, "generating return matrix");

    let data: Vec<f64> = match model {
        ReturnModel::Bootstrap => {
            let pick = Uniform::new(0, returns.len());
            pick.sample_iter(&mut *rng)
                .take(cells)
                .map(|i| returns[i])
                .collect()
        }

        ReturnModel::Normal => {
            let stats = ReturnStats::from_returns(returns)?;
            let normal = Normal::new(stats.mean, stats.std_dev()).map_err(|e| {
                SimError::InvalidParameter(format!(
                    "normal model with mean {} and std dev {}: {e}",
                    stats.mean,
                    stats.std_dev()
                ))
            })?;
            debug!(
                count = stats.count,
                mean = stats.mean,
                std_dev = stats.std_dev(),
                "fitted normal returns"
            );
            normal.sample_iter(&mut *rng).take(cells).collect()
        }
    };

    Ok(Matrix::from_row_major(days, simulations, data))
}
