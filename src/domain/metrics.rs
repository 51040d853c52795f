//! Summary statistics over a finalized NAV series.

use super::backtest::NavPoint;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Performance summary for one NAV series.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub final_value: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    /// Non-positive; 0 for a series that never falls below its running peak.
    pub max_drawdown: f64,
    pub trading_days: usize,
}

impl Summary {
    pub fn compute(nav: &[NavPoint], risk_free_rate: f64) -> Self {
        let trading_days = nav.len();
        let initial = nav.first().map(|p| p.value).unwrap_or(0.0);
        let final_value = nav.last().map(|p| p.value).unwrap_or(0.0);

        let total_return = if initial > 0.0 {
            final_value / initial - 1.0
        } else {
            0.0
        };

        let years = trading_days as f64 / TRADING_DAYS_PER_YEAR;
        let annualized_return = if years > 0.0 && total_return.is_finite() {
            (1.0 + total_return).powf(1.0 / years) - 1.0
        } else {
            0.0
        };

        let returns = daily_returns(nav);
        let volatility = stddev(&returns) * TRADING_DAYS_PER_YEAR.sqrt();

        let sharpe_ratio = if volatility > 0.0 {
            (annualized_return - risk_free_rate) / volatility
        } else {
            0.0
        };

        Summary {
            final_value,
            total_return,
            annualized_return,
            volatility,
            sharpe_ratio,
            max_drawdown: max_drawdown(nav),
            trading_days,
        }
    }
}

fn daily_returns(nav: &[NavPoint]) -> Vec<f64> {
    nav.windows(2)
        .map(|w| {
            if w[0].value > 0.0 {
                (w[1].value - w[0].value) / w[0].value
            } else {
                0.0
            }
        })
        .collect()
}

fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Minimum over time of (value - running peak) / running peak. Never positive.
pub fn max_drawdown(nav: &[NavPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for point in nav {
        if point.value > peak {
            peak = point.value;
        } else if peak > 0.0 {
            let dd = (point.value - peak) / peak;
            if dd < worst {
                worst = dd;
            }
        }
    }
    worst
}
