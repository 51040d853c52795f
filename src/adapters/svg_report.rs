//! SVG report adapter implementing ReportPort.
//!
//! Writes the three summary charts into the output directory.

use std::fs;
use std::path::Path;

use crate::adapters::chart_svg;
use crate::domain::backtest::BacktestResult;
use crate::domain::error::AiptError;
use crate::domain::metrics::Summary;
use crate::ports::report_port::ReportPort;

pub const NAV_CHART_FILE: &str = "01_nav_curve.svg";
pub const ALLOCATION_CHART_FILE: &str = "02_allocation_history.svg";
pub const INDICATOR_CHART_FILE: &str = "03_indicator_evolution.svg";

pub struct SvgReportAdapter;

impl SvgReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for SvgReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        _portfolio: &Summary,
        _benchmark: &Summary,
        output_dir: &Path,
    ) -> Result<(), AiptError> {
        fs::create_dir_all(output_dir)?;

        let charts = [
            (
                NAV_CHART_FILE,
                chart_svg::nav_chart(&result.portfolio_nav, &result.benchmark_nav),
            ),
            (
                ALLOCATION_CHART_FILE,
                chart_svg::allocation_chart(&result.allocations, &result.phase_changes),
            ),
            (
                INDICATOR_CHART_FILE,
                chart_svg::indicator_chart(&result.signals),
            ),
        ];

        for (name, content) in charts {
            let path = output_dir.join(name);
            fs::write(&path, content)?;
            eprintln!("  chart written: {}", path.display());
        }

        Ok(())
    }
}
