use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use crate::models::PricePoint;

/// One entry of the `/cenyzlota` response
///
/// NBP names the fields in Polish: `data` is the quotation date and `cena`
/// the price of 1g of gold in PLN.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldPriceEntry {
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "cena")]
    pub price: f64,
}

impl From<GoldPriceEntry> for PricePoint {
    fn from(entry: GoldPriceEntry) -> Self {
        PricePoint::new(entry.date, entry.price)
    }
}

/// Error type for NBP API operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request (e.g. range longer than the API allows)
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404, NBP's answer for a range without quotations
    #[error("No data: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {retry_after} s")]
    RateLimited { retry_after: u64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// A quotation that is not a positive number
    #[error("Invalid price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },
}
