//! Immutable model configuration.
//!
//! Tier baskets, benchmark, and backtest parameters live in one explicit
//! structure handed to the simulator, instead of module-level constants.
//! Values come from an INI file through [`ConfigPort`], with compiled-in
//! defaults matching the curated strategy.

use chrono::NaiveDate;
use std::collections::HashSet;

use super::backtest::BacktestConfig;
use super::error::AiptError;
use super::tier::{Tier, TierBaskets};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_START: &str = "2024-04-01";
pub const DEFAULT_END: &str = "2026-02-27";
/// Prices are loaded ahead of the window so day-one returns exist.
pub const DEFAULT_FETCH_START: &str = "2023-06-01";
pub const DEFAULT_BENCHMARK: &str = "SPY";
pub const DEFAULT_INITIAL_CAPITAL: f64 = 1_000_000.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub baskets: TierBaskets,
    pub benchmark: String,
    pub backtest: BacktestConfig,
    pub fetch_start: NaiveDate,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parse a comma-separated ticker list, uppercased, rejecting empties and
/// duplicates.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, TickerListError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

impl ModelConfig {
    /// The compiled-in strategy: curated baskets, SPY benchmark, the default
    /// backtest window.
    pub fn default_model() -> Self {
        ModelConfig {
            baskets: TierBaskets::new([
                vec!["MSFT".into(), "AMZN".into(), "GOOGL".into()],
                vec!["NVDA".into()],
                vec!["CEG".into(), "NEE".into()],
                vec!["XLP".into()],
                vec!["SHV".into()],
            ]),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            backtest: BacktestConfig {
                start_date: parse_date_literal(DEFAULT_START),
                end_date: parse_date_literal(DEFAULT_END),
                initial_capital: DEFAULT_INITIAL_CAPITAL,
                risk_free_rate: DEFAULT_RISK_FREE_RATE,
            },
            fetch_start: parse_date_literal(DEFAULT_FETCH_START),
        }
    }

    /// Build from a config source, falling back to the defaults for any
    /// missing key.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AiptError> {
        let defaults = ModelConfig::default_model();

        let start_date = read_date(config, "backtest", "start_date")?
            .unwrap_or(defaults.backtest.start_date);
        let end_date =
            read_date(config, "backtest", "end_date")?.unwrap_or(defaults.backtest.end_date);
        let fetch_start = read_date(config, "data", "fetch_start")?.unwrap_or(defaults.fetch_start);

        let mut baskets: [Vec<String>; 5] = Default::default();
        let keys = [
            "core_platform",
            "ai_accelerator",
            "power_infra",
            "defensive",
            "cash_equivalent",
        ];
        for tier in Tier::ALL {
            let key = keys[tier.index()];
            baskets[tier.index()] = match config.get_string("tiers", key) {
                Some(list) => {
                    parse_tickers(&list).map_err(|e| AiptError::ConfigInvalid {
                        section: "tiers".into(),
                        key: key.into(),
                        reason: e.to_string(),
                    })?
                }
                None => defaults.baskets.tickers(tier).to_vec(),
            };
        }

        Ok(ModelConfig {
            baskets: TierBaskets::new(baskets),
            benchmark: config
                .get_string("data", "benchmark")
                .unwrap_or(defaults.benchmark),
            backtest: BacktestConfig {
                start_date,
                end_date,
                initial_capital: config.get_double(
                    "backtest",
                    "initial_capital",
                    DEFAULT_INITIAL_CAPITAL,
                ),
                risk_free_rate: config.get_double(
                    "backtest",
                    "risk_free_rate",
                    DEFAULT_RISK_FREE_RATE,
                ),
            },
            fetch_start,
        })
    }

    /// Every ticker the backtest needs prices for, benchmark included.
    pub fn all_tickers(&self) -> Vec<String> {
        let mut tickers = self.baskets.all_tickers();
        if !tickers.contains(&self.benchmark) {
            tickers.push(self.benchmark.clone());
        }
        tickers
    }
}

fn read_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, AiptError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AiptError::ConfigInvalid {
                section: section.into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }),
    }
}

// Compiled-in date literals are known valid.
fn parse_date_literal(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn default_model_matches_curated_strategy() {
        let model = ModelConfig::default_model();
        assert_eq!(model.benchmark, "SPY");
        assert_eq!(
            model.baskets.tickers(Tier::CorePlatform),
            &["MSFT", "AMZN", "GOOGL"]
        );
        assert_eq!(model.baskets.tickers(Tier::AiAccelerator), &["NVDA"]);
        assert_eq!(
            model.backtest.start_date,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert!(model.fetch_start < model.backtest.start_date);
        assert!((model.backtest.risk_free_rate - 0.045).abs() < f64::EPSILON);
    }

    #[test]
    fn all_tickers_includes_benchmark_once() {
        let model = ModelConfig::default_model();
        let tickers = model.all_tickers();
        assert_eq!(tickers.iter().filter(|t| *t == "SPY").count(), 1);
        assert!(tickers.contains(&"NVDA".to_string()));
    }

    #[test]
    fn parse_tickers_uppercases_and_trims() {
        let tickers = parse_tickers(" msft , amzn ").unwrap();
        assert_eq!(tickers, vec!["MSFT", "AMZN"]);
    }

    #[test]
    fn parse_tickers_rejects_empty_token() {
        assert!(matches!(
            parse_tickers("MSFT,,AMZN"),
            Err(TickerListError::EmptyToken)
        ));
    }

    #[test]
    fn parse_tickers_rejects_duplicates() {
        assert!(matches!(
            parse_tickers("MSFT,msft"),
            Err(TickerListError::DuplicateTicker(_))
        ));
    }

    #[test]
    fn from_config_overrides_window_and_baskets() {
        let ini = "\
[backtest]
start_date = 2025-01-02
end_date = 2025-12-31
initial_capital = 500000

[data]
benchmark = QQQ

[tiers]
core_platform = MSFT
";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let model = ModelConfig::from_config(&adapter).unwrap();

        assert_eq!(
            model.backtest.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
        assert!((model.backtest.initial_capital - 500_000.0).abs() < f64::EPSILON);
        assert_eq!(model.benchmark, "QQQ");
        assert_eq!(model.baskets.tickers(Tier::CorePlatform), &["MSFT"]);
        // Unspecified tiers keep their defaults.
        assert_eq!(model.baskets.tickers(Tier::Defensive), &["XLP"]);
    }

    #[test]
    fn from_config_rejects_bad_date() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nstart_date = 01/02/2025\n").unwrap();
        let err = ModelConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(err, AiptError::ConfigInvalid { .. }));
    }

    #[test]
    fn from_config_rejects_bad_ticker_list() {
        let adapter = FileConfigAdapter::from_string("[tiers]\ndefensive = XLP,,\n").unwrap();
        let err = ModelConfig::from_config(&adapter).unwrap_err();
        assert!(matches!(err, AiptError::ConfigInvalid { .. }));
    }
}
