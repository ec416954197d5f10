pub mod nbp;

use chrono::NaiveDate;
use crate::models::PriceSeries;

pub use nbp::{ApiError, NbpClient};

/// Anything that can supply a daily gold price series for a date range
pub trait PriceSource {
    async fn fetch_series(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, ApiError>;
}

impl PriceSource for NbpClient {
    async fn fetch_series(&self, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, ApiError> {
        self.get_gold_prices(start, end).await
    }
}
