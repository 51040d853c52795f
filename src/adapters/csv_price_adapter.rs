//! CSV file price adapter.
//!
//! Reads one `{TICKER}.csv` per symbol from a base directory, with
//! `date,close` rows.

use crate::domain::error::AiptError;
use crate::domain::prices::ClosePoint;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosePoint>, AiptError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(AiptError::NoPrices {
                ticker: ticker.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| AiptError::PriceData {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| AiptError::PriceData {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| AiptError::PriceData {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                AiptError::PriceData {
                    reason: format!("invalid date in {}: {}", path.display(), e),
                }
            })?;

            if date < start || date > end {
                continue;
            }

            let close: f64 = record
                .get(1)
                .ok_or_else(|| AiptError::PriceData {
                    reason: format!("missing close column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| AiptError::PriceData {
                    reason: format!("invalid close value in {}: {}", path.display(), e),
                })?;

            points.push(ClosePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}
