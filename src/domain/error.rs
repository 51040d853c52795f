//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for aipt.
#[derive(Debug, thiserror::Error)]
pub enum AiptError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    PriceData { reason: String },

    #[error("no price history for {ticker}")]
    NoPrices { ticker: String },

    #[error("backtest window {start} to {end} contains no usable trading days")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AiptError> for std::process::ExitCode {
    fn from(err: &AiptError) -> Self {
        let code: u8 = match err {
            AiptError::Io(_) => 1,
            AiptError::ConfigParse { .. }
            | AiptError::ConfigMissing { .. }
            | AiptError::ConfigInvalid { .. } => 2,
            AiptError::PriceData { .. } | AiptError::NoPrices { .. } => 3,
            AiptError::EmptyWindow { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
