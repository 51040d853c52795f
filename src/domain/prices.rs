//! Daily close alignment and per-tier return series.
//!
//! Per-ticker series are merged onto one unified trading-day timeline and
//! forward-filled; gaps before a ticker's first observation stay empty.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use super::tier::{Tier, TierBaskets};

/// One daily closing price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Per-ticker closes aligned onto a unified sorted timeline.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    timeline: Vec<NaiveDate>,
    closes: HashMap<String, Vec<Option<f64>>>,
}

impl PriceHistory {
    pub fn from_series(series: Vec<(String, Vec<ClosePoint>)>) -> Self {
        let unique_dates: BTreeSet<NaiveDate> = series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|p| p.date))
            .collect();
        let timeline: Vec<NaiveDate> = unique_dates.into_iter().collect();

        let mut closes = HashMap::new();
        for (ticker, points) in series {
            let by_date: HashMap<NaiveDate, f64> =
                points.iter().map(|p| (p.date, p.close)).collect();
            let mut aligned = Vec::with_capacity(timeline.len());
            let mut last: Option<f64> = None;
            for date in &timeline {
                if let Some(&close) = by_date.get(date) {
                    last = Some(close);
                }
                aligned.push(last);
            }
            closes.insert(ticker, aligned);
        }

        PriceHistory { timeline, closes }
    }

    pub fn timeline(&self) -> &[NaiveDate] {
        &self.timeline
    }

    /// Day-over-day return for a ticker at timeline index `i`, when both the
    /// previous and current close are known.
    fn daily_return(&self, ticker: &str, i: usize) -> Option<f64> {
        if i == 0 {
            return None;
        }
        let aligned = self.closes.get(ticker)?;
        let prev = aligned[i - 1]?;
        let curr = aligned[i]?;
        if prev > 0.0 {
            Some((curr - prev) / prev)
        } else {
            None
        }
    }
}

/// Per-day tier and benchmark returns over a timeline. Day zero carries no
/// return.
#[derive(Debug, Clone)]
pub struct ReturnTable {
    pub dates: Vec<NaiveDate>,
    pub tier_returns: Vec<[f64; 5]>,
    pub benchmark_returns: Vec<f64>,
}

impl ReturnTable {
    /// Build tier returns as the equal-weighted mean of each basket's
    /// available per-ticker returns. A tier with no usable data contributes a
    /// zero return; same for a missing benchmark.
    pub fn build(history: &PriceHistory, baskets: &TierBaskets, benchmark: &str) -> Self {
        let n = history.timeline().len();
        let mut tier_returns = Vec::with_capacity(n);
        let mut benchmark_returns = Vec::with_capacity(n);

        for i in 0..n {
            let mut day = [0.0_f64; 5];
            for tier in Tier::ALL {
                let returns: Vec<f64> = baskets
                    .tickers(tier)
                    .iter()
                    .filter_map(|t| history.daily_return(t, i))
                    .collect();
                if !returns.is_empty() {
                    day[tier.index()] = returns.iter().sum::<f64>() / returns.len() as f64;
                }
            }
            tier_returns.push(day);
            benchmark_returns.push(history.daily_return(benchmark, i).unwrap_or(0.0));
        }

        ReturnTable {
            dates: history.timeline().to_vec(),
            tier_returns,
            benchmark_returns,
        }
    }

    /// Narrow to trading days inside `[start, end]`, keeping the returns
    /// already computed across the boundary.
    pub fn restrict(&self, start: NaiveDate, end: NaiveDate) -> ReturnTable {
        let mut dates = Vec::new();
        let mut tier_returns = Vec::new();
        let mut benchmark_returns = Vec::new();
        for (i, &date) in self.dates.iter().enumerate() {
            if date >= start && date <= end {
                dates.push(date);
                tier_returns.push(self.tier_returns[i]);
                benchmark_returns.push(self.benchmark_returns[i]);
            }
        }
        ReturnTable {
            dates,
            tier_returns,
            benchmark_returns,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
