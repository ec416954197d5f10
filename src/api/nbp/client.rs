use std::time::Duration;
use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use super::models::{ApiError, GoldPriceEntry};
use crate::models::{PricePoint, PriceSeries};
use crate::utils::extract_clean_error;
use tracing::{debug, info, warn};

/// Client for the National Bank of Poland public rates API
pub struct NbpClient {
    http_client: HttpClient,
    base_url: String,
}

impl NbpClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.nbp.pl/api";

    /// Create a new client; `base_url` is normally [`Self::DEFAULT_BASE_URL`]
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .default_headers(Self::create_headers())
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// URL of the gold price series between two dates (inclusive)
    pub fn gold_prices_url(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/cenyzlota/{}/{}?format=json",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )
    }

    /// Map a failed response to an error
    ///
    /// NBP answers in plain text such as `404 NotFound - Not Found - Brak danych`;
    /// only the last segment is kept.
    fn error_from_status(status_code: u16, body_text: &str, retry_after: Option<u64>) -> ApiError {
        let message = extract_clean_error(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            429 => {
                let retry_after = retry_after.unwrap_or(1);
                warn!("Rate limited by NBP, retry after {} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    /// Decode a `/cenyzlota` body into a date-ordered series
    pub fn parse_gold_prices(body: &str) -> Result<PriceSeries, ApiError> {
        let entries: Vec<GoldPriceEntry> = serde_json::from_str(body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if let Some(bad) = entries.iter().find(|e| !e.price.is_finite() || e.price <= 0.0) {
            return Err(ApiError::InvalidPrice {
                date: bad.date,
                price: bad.price,
            });
        }

        let mut series: PriceSeries = entries.into_iter().map(PricePoint::from).collect();
        // NBP returns ascending dates, but don't rely on it
        series.sort_by_key(|p| p.date);

        Ok(series)
    }

    /// GET /cenyzlota/{start}/{end}
    ///
    /// Retrieves the daily gold price (PLN per 1g) for every quotation day in
    /// the range.
    ///
    /// # Returns
    /// * `Ok(PriceSeries)` - Quotations ordered by date
    /// * `Err(ApiError)` - Transport, status or payload error
    pub async fn get_gold_prices(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let url = self.gold_prices_url(start, end);
        debug!("Fetching gold prices from {}", url);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::error_from_status(status.as_u16(), &body_text, retry_after));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))?;

        let series = Self::parse_gold_prices(&body_text)?;
        info!("📈 Fetched {} gold quotations for {} .. {}", series.len(), start, end);

        Ok(series)
    }
}
