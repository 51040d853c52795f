//! Core domain types and logic.

pub mod tier;
pub mod indicators;
pub mod phase;
pub mod allocation;
pub mod quarters;
pub mod prices;
pub mod backtest;
pub mod metrics;
pub mod config;
pub mod error;
