//! Historical closing prices and the providers that supply them.
//!
//! The simulation core only sees a [`PriceSeries`]. Where the prices come
//! from is behind [`MarketDataProvider`]; any failure to obtain them is a
//! [`SimError::DataUnavailable`], never an empty series.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SimError};

/// Five years of trading days.
pub const DEFAULT_LOOKBACK: usize = 5 * 252;

/// Time-ordered closing prices, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(closes: Vec<f64>) -> Result<Self> {
        if let Some((i, p)) = closes
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.is_finite() && **p > 0.0))
        {
            return Err(SimError::InvalidParameter(format!(
                "closing price #{i} must be positive and finite, got {p}"
            )));
        }
        Ok(Self { closes })
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// Keeps only the most recent `lookback` observations.
    pub fn tail(mut self, lookback: usize) -> Self {
        if self.closes.len() > lookback {
            self.closes.drain(..self.closes.len() - lookback);
        }
        self
    }
}

pub trait MarketDataProvider {
    /// The trailing `lookback` closes for `symbol`.
    fn closing_prices(&self, symbol: &str, lookback: usize) -> Result<PriceSeries>;
}

/// Closes held in memory, keyed by symbol.
#[derive(Clone, Debug, Default)]
pub struct StaticPriceSource {
    series: HashMap<String, Vec<f64>>,
}

impl StaticPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.series.insert(symbol.to_string(), closes);
        self
    }
}

impl MarketDataProvider for StaticPriceSource {
    fn closing_prices(&self, symbol: &str, lookback: usize) -> Result<PriceSeries> {
        let closes = self
            .series
            .get(symbol)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SimError::DataUnavailable(format!("no prices for symbol '{symbol}'")))?;
        Ok(PriceSeries::new(closes.clone())?.tail(lookback))
    }
}

#[derive(Clone, Debug)]
enum CsvLocation {
    /// `<dir>/<SYMBOL>.csv`
    Directory(PathBuf),
    /// One file regardless of symbol.
    File(PathBuf),
}

/// Closing prices read from CSV files with a header row.
///
/// The price column is the first header named `close`, `adj close` or
/// `price` (case-insensitive), falling back to the last column. Cells that
/// do not parse as numbers are skipped.
#[derive(Clone, Debug)]
pub struct CsvPriceSource {
    location: CsvLocation,
}

impl CsvPriceSource {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            location: CsvLocation::Directory(dir.as_ref().to_path_buf()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: CsvLocation::File(path.as_ref().to_path_buf()),
        }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        match &self.location {
            CsvLocation::Directory(dir) => dir.join(format!("{symbol}.csv")),
            CsvLocation::File(path) => path.clone(),
        }
    }
}

fn close_column(headers: &csv::StringRecord) -> Option<usize> {
    const NAMES: [&str; 4] = ["close", "adj close", "adj_close", "price"];

    NAMES
        .iter()
        .find_map(|name| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        })
        .or_else(|| headers.len().checked_sub(1))
}

fn read_closes(path: &Path) -> Result<Vec<f64>> {
    let unavailable =
        |msg: String| SimError::DataUnavailable(format!("{}: {msg}", path.display()));

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| unavailable(format!("failed to open CSV: {e}")))?;
    let headers = reader
        .headers()
        .map_err(|e| unavailable(format!("failed to read headers: {e}")))?
        .clone();
    let col = close_column(&headers).ok_or_else(|| unavailable("no columns".to_string()))?;

    let mut closes = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| unavailable(format!("row {}: {e}", line + 2)))?;
        match record.get(col).map(|v| v.trim().parse::<f64>()) {
            Some(Ok(v)) if v.is_finite() => closes.push(v),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped rows without a numeric close");
    }
    if closes.is_empty() {
        return Err(unavailable("no numeric closing prices".to_string()));
    }
    debug!(path = %path.display(), rows = closes.len(), "loaded closing prices");

    Ok(closes)
}

impl MarketDataProvider for CsvPriceSource {
    fn closing_prices(&self, symbol: &str, lookback: usize) -> Result<PriceSeries> {
        let closes = read_closes(&self.path_for(symbol))?;
        Ok(PriceSeries::new(closes)?.tail(lookback))
    }
}
