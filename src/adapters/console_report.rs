//! Console report adapter: text summary to stderr.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::AiptError;
use crate::domain::metrics::Summary;
use crate::ports::report_port::ReportPort;

pub struct ConsoleReportAdapter;

impl ConsoleReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for ConsoleReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        portfolio: &Summary,
        benchmark: &Summary,
        _output_dir: &Path,
    ) -> Result<(), AiptError> {
        let first = result.portfolio_nav.first();
        let last = result.portfolio_nav.last();
        if let (Some(first), Some(last)) = (first, last) {
            eprintln!("\n=== Backtest Summary ===");
            eprintln!("Window:            {} to {}", first.date, last.date);
            eprintln!("Trading days:      {}", portfolio.trading_days);
            eprintln!();
            eprintln!("{:<20} {:>14} {:>14}", "", "Portfolio", "Benchmark");
            eprintln!(
                "{:<20} {:>14} {:>14}",
                "Final value",
                format!("${:.0}", portfolio.final_value),
                format!("${:.0}", benchmark.final_value),
            );
            eprintln!(
                "{:<20} {:>13.2}% {:>13.2}%",
                "Total return",
                portfolio.total_return * 100.0,
                benchmark.total_return * 100.0,
            );
            eprintln!(
                "{:<20} {:>13.2}% {:>13.2}%",
                "Annualized return",
                portfolio.annualized_return * 100.0,
                benchmark.annualized_return * 100.0,
            );
            eprintln!(
                "{:<20} {:>13.2}% {:>13.2}%",
                "Max drawdown",
                portfolio.max_drawdown * 100.0,
                benchmark.max_drawdown * 100.0,
            );
            eprintln!(
                "{:<20} {:>13.2}% {:>13.2}%",
                "Volatility",
                portfolio.volatility * 100.0,
                benchmark.volatility * 100.0,
            );
            eprintln!(
                "{:<20} {:>14.2} {:>14.2}",
                "Sharpe ratio", portfolio.sharpe_ratio, benchmark.sharpe_ratio,
            );
            eprintln!();
            eprintln!(
                "Excess return:     {:+.2}%",
                (portfolio.total_return - benchmark.total_return) * 100.0
            );
        }
        Ok(())
    }
}
