//! Price data access port trait.

use crate::domain::error::AiptError;
use crate::domain::prices::ClosePoint;
use chrono::NaiveDate;

/// Source of daily closing prices, one series per ticker.
pub trait PriceDataPort {
    /// Closes for `ticker` within `[start, end]`, sorted by date.
    ///
    /// A ticker with no retrievable history yields [`AiptError::NoPrices`];
    /// the pipeline logs it and excludes the ticker from return computation.
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePoint>, AiptError>;
}
