//! Compounds simulated returns into price paths anchored at the last close.

use crate::generator::ReturnMatrix;
use crate::matrix::Matrix;

/// Simulated prices, rows = days + 1, columns = simulation runs.
///
/// Row 0 holds the anchor price in every column.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    anchor: f64,
    prices: Matrix,
}

impl PathEnsemble {
    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    /// Number of simulated days (rows minus the anchor row).
    pub fn days(&self) -> usize {
        self.prices.rows().saturating_sub(1)
    }

    pub fn simulations(&self) -> usize {
        self.prices.cols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.prices.shape()
    }

    pub fn prices(&self) -> &Matrix {
        &self.prices
    }

    pub fn final_prices(&self) -> &[f64] {
        self.prices.last_row()
    }

    /// One simulated run, anchor first. `None` when `run` is out of range.
    pub fn path(&self, run: usize) -> Option<Vec<f64>> {
        self.prices.column(run).map(|c| c.collect())
    }

    /// Per-run `(min, max)` over the whole path, anchor row included.
    pub fn extremes(&self) -> Vec<(f64, f64)> {
        let mut extremes = vec![(self.anchor, self.anchor); self.simulations()];
        for row in self.prices.iter_rows().skip(1) {
            for (e, &p) in extremes.iter_mut().zip(row) {
                e.0 = e.0.min(p);
                e.1 = e.1.max(p);
            }
        }
        extremes
    }
}

/// Cumulative product of `1 + r` down each column, scaled by `anchor`, with
/// the anchor prepended as row 0.
pub fn build_paths(returns: &ReturnMatrix, anchor: f64) -> PathEnsemble {
    let (days, simulations) = returns.shape();
    let mut data = Vec::with_capacity((days + 1) * simulations);

    let mut current = vec![anchor; simulations];
    data.extend_from_slice(&current);

    for row in returns.iter_rows() {
        for (price, r) in current.iter_mut().zip(row) {
            *price *= 1.0 + r;
        }
        data.extend_from_slice(&current);
    }

    PathEnsemble {
        anchor,
        prices: Matrix::from_row_major(days + 1, simulations, data),
    }
}
