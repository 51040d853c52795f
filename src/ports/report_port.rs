//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::AiptError;
use crate::domain::metrics::Summary;

/// Sink for backtest output: summary statistics plus the full series.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        portfolio: &Summary,
        benchmark: &Summary,
        output_dir: &Path,
    ) -> Result<(), AiptError>;
}
