//! Backtest simulator: one chronological pass over the trading-day window.

use chrono::NaiveDate;

use super::allocation::{allocation_for, TierWeights};
use super::error::AiptError;
use super::indicators::IndicatorSet;
use super::phase::Phase;
use super::prices::ReturnTable;
use super::quarters::{active_record, QuarterRecord};
use super::tier::Tier;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub risk_free_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationPoint {
    pub date: NaiveDate,
    /// Per-tier allocation in whole percentages, tier-index order.
    pub percentages: [f64; 5],
}

/// Emitted when the active quarterly record's phase differs from the phase
/// currently driving the allocation.
#[derive(Debug, Clone)]
pub struct PhaseChange {
    pub date: NaiveDate,
    pub quarter: &'static str,
    pub phase: Phase,
    pub note: &'static str,
    pub weights: TierWeights,
    pub indicators: IndicatorSet,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub portfolio_nav: Vec<NavPoint>,
    pub benchmark_nav: Vec<NavPoint>,
    pub allocations: Vec<AllocationPoint>,
    pub phase_changes: Vec<PhaseChange>,
    pub signals: Vec<QuarterRecord>,
}

/// Run the simulation over `[config.start_date, config.end_date]`.
///
/// Days before the first effective quarterly record are dropped from every
/// output series. The first recorded day sets portfolio and benchmark to the
/// initial capital without applying a return; every later day compounds both
/// values by their daily returns. A window with zero usable trading days is a
/// fatal configuration error.
pub fn run_backtest(
    returns: &ReturnTable,
    signals: &[QuarterRecord],
    config: &BacktestConfig,
) -> Result<BacktestResult, AiptError> {
    let window = returns.restrict(config.start_date, config.end_date);
    if window.is_empty() {
        return Err(AiptError::EmptyWindow {
            start: config.start_date,
            end: config.end_date,
        });
    }

    let mut portfolio_value = config.initial_capital;
    let mut benchmark_value = config.initial_capital;
    let mut current_phase: Option<Phase> = None;
    let mut weights = TierWeights::ZERO;

    let mut portfolio_nav = Vec::with_capacity(window.len());
    let mut benchmark_nav = Vec::with_capacity(window.len());
    let mut allocations = Vec::with_capacity(window.len());
    let mut phase_changes = Vec::new();

    for (i, &date) in window.dates.iter().enumerate() {
        let Some(record) = active_record(signals, date) else {
            // No signal yet: the day never enters the output series.
            continue;
        };

        if current_phase != Some(record.phase) {
            weights = allocation_for(record.phase);
            phase_changes.push(PhaseChange {
                date,
                quarter: record.quarter,
                phase: record.phase,
                note: record.note,
                weights,
                indicators: record.indicators,
            });
            current_phase = Some(record.phase);
        }

        if !portfolio_nav.is_empty() {
            let day = &window.tier_returns[i];
            let portfolio_return: f64 = Tier::ALL
                .iter()
                .map(|t| weights.get(*t) * day[t.index()])
                .sum();
            portfolio_value *= 1.0 + portfolio_return;
            benchmark_value *= 1.0 + window.benchmark_returns[i];
        }

        portfolio_nav.push(NavPoint {
            date,
            value: portfolio_value,
        });
        benchmark_nav.push(NavPoint {
            date,
            value: benchmark_value,
        });
        allocations.push(AllocationPoint {
            date,
            percentages: weights.as_percentages(),
        });
    }

    if portfolio_nav.is_empty() {
        // Every day in the window predates the first quarterly signal.
        return Err(AiptError::EmptyWindow {
            start: config.start_date,
            end: config.end_date,
        });
    }

    Ok(BacktestResult {
        portfolio_nav,
        benchmark_nav,
        allocations,
        phase_changes,
        signals: signals.to_vec(),
    })
}
