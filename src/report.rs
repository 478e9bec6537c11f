//! Simulation Report
//!
//! Reduces a path ensemble to probability and percentile statistics.
//!
//! ## Metrics
//! - P(final price > target)
//! - P(path ever above threshold), threshold defaults to the target
//! - P(path ever below threshold), only when a threshold is given
//! - 25th/75th percentile of final prices (linear interpolation)
//! - Min/max of final prices
//!
//! Every probability is a Monte Carlo point estimate out of `simulations`
//! trials; its standard error shrinks with the square root of the run count.

use std::io::{self, Write};

use tracing::debug;

use crate::error::{Result, SimError};
use crate::paths::PathEnsemble;

/// User thresholds for the report.
///
/// `ever_above` falls back to `target_price` when unset. `ever_below` is
/// only evaluated when set.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    pub target_price: f64,
    pub ever_above: Option<f64>,
    pub ever_below: Option<f64>,
}

impl Thresholds {
    pub fn new(target_price: f64) -> Self {
        Self {
            target_price,
            ever_above: None,
            ever_below: None,
        }
    }

    pub fn with_ever_above(mut self, threshold: f64) -> Self {
        self.ever_above = Some(threshold);
        self
    }

    pub fn with_ever_below(mut self, threshold: f64) -> Self {
        self.ever_below = Some(threshold);
        self
    }

    pub fn ever_above_threshold(&self) -> f64 {
        self.ever_above.unwrap_or(self.target_price)
    }

    pub fn validate(&self) -> Result<()> {
        check_price("target price", self.target_price)?;
        if let Some(t) = self.ever_above {
            check_price("ever-above threshold", t)?;
        }
        if let Some(t) = self.ever_below {
            check_price("ever-below threshold", t)?;
        }
        Ok(())
    }
}

fn check_price(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter(format!(
            "{what} must be a positive finite number, got {value}"
        )))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdProbability {
    pub threshold: f64,
    pub probability: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    pub simulations: usize,
    pub days: usize,
    pub current_price: f64,
    pub target_price: f64,
    pub prob_above_target: f64,
    pub ever_above: ThresholdProbability,
    /// `None` when no ever-below threshold was configured.
    pub ever_below: Option<ThresholdProbability>,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl SimulationReport {
    /// Standard error of `prob_above_target`, sqrt(p(1-p)/n).
    pub fn standard_error(&self) -> f64 {
        let p = self.prob_above_target;
        (p * (1.0 - p) / self.simulations as f64).sqrt()
    }

    /// Writes the human-readable summary, one line per metric.
    pub fn write_to<W: Write>(&self, out: &mut W, ticker: &str, model: &str) -> io::Result<()> {
        writeln!(out, "Monte Carlo simulation results for {}:", ticker)?;
        writeln!(out, "Number of simulations: {}", self.simulations)?;
        writeln!(out, "Number of days: {}", self.days)?;
        writeln!(out, "Return model: {}", model)?;
        writeln!(out, "Target price: ${:.2}", self.target_price)?;
        writeln!(
            out,
            "Probability of price above target: {:.2}%",
            self.prob_above_target * 100.0
        )?;
        writeln!(
            out,
            "Probability of ever exceeding ${:.2}: {:.2}%",
            self.ever_above.threshold,
            self.ever_above.probability * 100.0
        )?;
        if let Some(below) = &self.ever_below {
            writeln!(
                out,
                "Probability of ever dipping below ${:.2}: {:.2}%",
                below.threshold,
                below.probability * 100.0
            )?;
        }
        writeln!(out, "Current price: ${:.2}", self.current_price)?;
        writeln!(
            out,
            "25th-75th percentile range: ${:.2} - ${:.2}",
            self.percentile_25, self.percentile_75
        )?;
        writeln!(
            out,
            "Simulated price range: ${:.2} - ${:.2}",
            self.min_price, self.max_price
        )?;
        writeln!(
            out,
            "Note: Monte Carlo estimates (standard error of above-target probability: {:.2}%)",
            self.standard_error() * 100.0
        )
    }
}

/// Fraction of `values` strictly greater than `threshold`.
pub fn fraction_above(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v > threshold).count() as f64 / values.len() as f64
}

/// Percentile with linear interpolation between order statistics, `p` in [0, 1].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = idx - lo as f64;
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

pub fn summarize(ensemble: &PathEnsemble, thresholds: &Thresholds) -> Result<SimulationReport> {
    thresholds.validate()?;
    let runs = ensemble.simulations();
    if runs == 0 {
        return Err(SimError::InvalidParameter(
            "cannot summarize an ensemble with zero simulations".to_string(),
        ));
    }

    let final_prices = ensemble.final_prices();
    let mut sorted = final_prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let extremes = ensemble.extremes();
    let above = thresholds.ever_above_threshold();
    let ever_above = ThresholdProbability {
        threshold: above,
        probability: extremes.iter().filter(|(_, max)| *max > above).count() as f64 / runs as f64,
    };
    let ever_below = thresholds.ever_below.map(|below| ThresholdProbability {
        threshold: below,
        probability: extremes.iter().filter(|(min, _)| *min < below).count() as f64 / runs as f64,
    });

    let report = SimulationReport {
        simulations: runs,
        days: ensemble.days(),
        current_price: ensemble.anchor(),
        target_price: thresholds.target_price,
        prob_above_target: fraction_above(final_prices, thresholds.target_price),
        ever_above,
        ever_below,
        percentile_25: percentile(&sorted, 0.25),
        percentile_75: percentile(&sorted, 0.75),
        min_price: sorted[0],
        max_price: sorted[runs - 1],
    };
    debug!(
        prob_above_target = report.prob_above_target,
        prob_ever_above = report.ever_above.probability,
        "summarized ensemble"
    );

    Ok(report)
}
