#![allow(dead_code)]

use std::collections::HashMap;

use aipt::domain::error::AiptError;
use aipt::domain::prices::ClosePoint;
use aipt::ports::data_port::PriceDataPort;
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily close series starting at `first_close`, compounding by
/// `daily_return` each calendar day.
pub fn compounding_closes(
    start: NaiveDate,
    days: usize,
    first_close: f64,
    daily_return: f64,
) -> Vec<ClosePoint> {
    let mut close = first_close;
    (0..days)
        .map(|i| {
            let point = ClosePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            };
            close *= 1.0 + daily_return;
            point
        })
        .collect()
}

/// In-memory price source keyed by ticker. Unknown tickers report as
/// missing histories, matching the CSV adapter.
pub struct MockPriceDataPort {
    series: HashMap<String, Vec<ClosePoint>>,
    failing: Vec<String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_series(mut self, ticker: &str, points: Vec<ClosePoint>) -> Self {
        self.series.insert(ticker.to_string(), points);
        self
    }

    /// Make `ticker` fail with a data error instead of a missing history.
    pub fn with_error(mut self, ticker: &str) -> Self {
        self.failing.push(ticker.to_string());
        self
    }
}

impl Default for MockPriceDataPort {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePoint>, AiptError> {
        if self.failing.iter().any(|t| t == ticker) {
            return Err(AiptError::PriceData {
                reason: format!("simulated failure for {ticker}"),
            });
        }
        match self.series.get(ticker) {
            Some(points) => Ok(points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect()),
            None => Err(AiptError::NoPrices {
                ticker: ticker.to_string(),
            }),
        }
    }
}
