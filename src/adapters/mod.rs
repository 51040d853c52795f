//! Concrete adapter implementations for ports.

pub mod csv_price_adapter;
pub mod file_config_adapter;
pub mod chart_svg;
pub mod svg_report;
pub mod console_report;
