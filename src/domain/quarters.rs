//! Curated quarterly signal table.
//!
//! One record per calendar quarter, 2023Q4 through 2025Q4, carrying the raw
//! metrics, the derived indicator scores, and the hand-assigned phase. The
//! phase column is the curated call made at the time, which does not always
//! match what [`crate::domain::phase::classify`] would derive from the same
//! inputs; the backtest follows the table.

use chrono::NaiveDate;

use super::indicators::IndicatorSet;
use super::phase::Phase;

/// One quarter's observation. Created statically, never mutated.
#[derive(Debug, Clone)]
pub struct QuarterRecord {
    pub quarter: &'static str,
    /// Date from which this quarter's phase drives the allocation.
    pub effective_date: NaiveDate,
    pub capex_growth: f64,
    pub revenue_growth: f64,
    pub cloud_growth: f64,
    pub dc_growth: f64,
    pub margin_change: f64,
    pub fcf_growth: f64,
    pub rate_10y: f64,
    pub rate_change: f64,
    pub indicators: IndicatorSet,
    pub phase: Phase,
    pub note: &'static str,
}

// Literal dates in the curated table are known valid.
fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scores(cm: f64, dr: f64, mq: f64, lp: f64, pc: f64) -> IndicatorSet {
    IndicatorSet {
        capex_momentum: cm,
        demand_realization: dr,
        margin_quality: mq,
        liquidity_pressure: lp,
        price_confirmation: pc,
    }
}

/// The full curated table, ordered by strictly increasing effective date.
pub fn signal_table() -> Vec<QuarterRecord> {
    vec![
        QuarterRecord {
            quarter: "2023Q4",
            effective_date: day(2024, 4, 1),
            capex_growth: 22.0,
            revenue_growth: 13.0,
            cloud_growth: 28.0,
            dc_growth: 206.0,
            margin_change: 3.0,
            fcf_growth: 15.0,
            rate_10y: 3.9,
            rate_change: -0.7,
            indicators: scores(9.0, 117.0, 18.0, -0.7, 50.0),
            phase: Phase::Expansion,
            note: "Expansion peak, initial allocation basis",
        },
        QuarterRecord {
            quarter: "2024Q1",
            effective_date: day(2024, 7, 1),
            capex_growth: 30.0,
            revenue_growth: 14.0,
            cloud_growth: 30.0,
            dc_growth: 262.0,
            margin_change: 2.0,
            fcf_growth: 20.0,
            rate_10y: 4.3,
            rate_change: 0.4,
            indicators: scores(16.0, 146.0, 22.0, 0.4, 50.0),
            phase: Phase::Expansion,
            note: "Capex arms race underway",
        },
        QuarterRecord {
            quarter: "2024Q2",
            effective_date: day(2024, 10, 1),
            capex_growth: 42.0,
            revenue_growth: 15.0,
            cloud_growth: 29.0,
            dc_growth: 122.0,
            margin_change: 3.0,
            fcf_growth: 25.0,
            rate_10y: 4.3,
            rate_change: 0.0,
            indicators: scores(27.0, 76.0, 28.0, 0.0, 50.0),
            phase: Phase::Expansion,
            note: "Arms race at full intensity",
        },
        QuarterRecord {
            quarter: "2024Q3",
            effective_date: day(2025, 1, 2),
            capex_growth: 55.0,
            revenue_growth: 14.0,
            cloud_growth: 33.0,
            dc_growth: 94.0,
            margin_change: 1.0,
            fcf_growth: 15.0,
            rate_10y: 4.2,
            rate_change: -0.1,
            indicators: scores(41.0, 64.0, 16.0, -0.1, 50.0),
            phase: Phase::Expansion,
            note: "Late expansion",
        },
        QuarterRecord {
            quarter: "2024Q4",
            effective_date: day(2025, 4, 1),
            capex_growth: 63.0,
            revenue_growth: 14.0,
            cloud_growth: 31.0,
            dc_growth: 78.0,
            margin_change: 1.0,
            fcf_growth: 10.0,
            rate_10y: 4.6,
            rate_change: 0.4,
            indicators: scores(49.0, 55.0, 11.0, 0.4, 50.0),
            phase: Phase::ExpansionToDivergence,
            note: "Doubt sets in, transition begins",
        },
        QuarterRecord {
            quarter: "2025Q1",
            effective_date: day(2025, 7, 1),
            capex_growth: 63.0,
            revenue_growth: 13.0,
            cloud_growth: 32.0,
            dc_growth: 69.0,
            margin_change: 0.0,
            fcf_growth: -5.0,
            rate_10y: 4.2,
            rate_change: -0.4,
            indicators: scores(50.0, 51.0, -5.0, -0.4, 50.0),
            phase: Phase::ExpansionToDivergence,
            note: "Margin quality turns negative, doubt deepens",
        },
        QuarterRecord {
            quarter: "2025Q2",
            effective_date: day(2025, 10, 1),
            capex_growth: 72.0,
            revenue_growth: 14.0,
            cloud_growth: 33.0,
            dc_growth: 52.0,
            margin_change: -1.0,
            fcf_growth: -20.0,
            rate_10y: 4.3,
            rate_change: 0.1,
            indicators: scores(58.0, 43.0, -21.0, 0.1, 50.0),
            phase: Phase::EfficiencyDivergence,
            note: "Efficiency reckoning opens",
        },
        QuarterRecord {
            quarter: "2025Q3",
            effective_date: day(2026, 1, 2),
            capex_growth: 78.0,
            revenue_growth: 14.0,
            cloud_growth: 35.0,
            dc_growth: 44.0,
            margin_change: -1.0,
            fcf_growth: -10.0,
            rate_10y: 4.5,
            rate_change: 0.2,
            indicators: scores(64.0, 40.0, -11.0, 0.2, 50.0),
            phase: Phase::EfficiencyDivergence,
            note: "Divergence continues",
        },
        QuarterRecord {
            quarter: "2025Q4",
            effective_date: day(2026, 4, 1),
            capex_growth: 100.0,
            revenue_growth: 16.0,
            cloud_growth: 38.0,
            dc_growth: 55.0,
            margin_change: -2.0,
            fcf_growth: -15.0,
            rate_10y: 4.0,
            rate_change: -0.5,
            indicators: scores(84.0, 47.0, -17.0, -0.5, 50.0),
            phase: Phase::EfficiencyDivergence,
            // Guidance-based estimate; effective date lands past the default window.
            note: "Divergence deepens, capex/margin gap at extreme",
        },
    ]
}

/// Most recent record whose effective date is on or before `date`.
pub fn active_record(records: &[QuarterRecord], date: NaiveDate) -> Option<&QuarterRecord> {
    records
        .iter()
        .filter(|r| r.effective_date <= date)
        .next_back()
}
