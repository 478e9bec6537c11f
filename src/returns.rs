//! Daily return extraction and the sample statistics derived from it.

use crate::error::{Result, SimError};

/// Fractional day-over-day changes `(p[i] - p[i-1]) / p[i-1]`, in time order.
///
/// The result has one element fewer than `prices`.
pub fn daily_returns(prices: &[f64]) -> Result<Vec<f64>> {
    if prices.len() < 2 {
        return Err(SimError::InsufficientData(format!(
            "need at least 2 closing prices to compute a return, got {}",
            prices.len()
        )));
    }

    Ok(prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect())
}

/// Sample moments of a return series.
///
/// Needs at least two returns; the n - 1 sample variance of a single
/// observation is undefined and yields `InsufficientData`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample variance (n - 1 denominator).
    pub variance: f64,
}

impl ReturnStats {
    pub fn from_returns(returns: &[f64]) -> Result<Self> {
        if returns.is_empty() {
            return Err(SimError::EmptyReturns(
                "mean and variance are undefined for an empty return series".to_string(),
            ));
        }

        if returns.len() < 2 {
            return Err(SimError::InsufficientData(
                "sample variance needs at least 2 returns, got 1".to_string(),
            ));
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

        Ok(Self {
            count: returns.len(),
            mean,
            variance,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
