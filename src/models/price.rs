//! Price series models

use chrono::NaiveDate;

/// One daily gold quotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Daily quotations ordered by non-decreasing date
pub type PriceSeries = Vec<PricePoint>;
