//! Port traits decoupling the domain from data sources and report sinks.

pub mod config_port;
pub mod data_port;
pub mod report_port;
