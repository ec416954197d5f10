use chrono::NaiveDate;
use tracing::{debug, error, info, warn};
use crate::api::PriceSource;
use crate::models::{ChartState, InvestmentResult, PricePoint, PriceSeries, RangeStatus};
use crate::services::chart_service::{ChartSurface, SeriesChartController};
use crate::services::{optimizer_service, range_service};

/// State of one tracker user: the selected range, the investment value, the
/// fetched series with its chart and the last computed window.
pub struct TrackerSession<P: PriceSource, S: ChartSurface> {
    source: P,
    charts: SeriesChartController<S>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    investment: Option<f64>,
    series: PriceSeries,
    last_result: Option<InvestmentResult>,
    error: Option<String>,
}

impl<P: PriceSource, S: ChartSurface> TrackerSession<P, S> {
    pub fn new(source: P, surface: S, today: NaiveDate) -> Self {
        let (start, end) = range_service::default_range(today);
        Self {
            source,
            charts: SeriesChartController::new(surface),
            start_date: Some(start),
            end_date: Some(end),
            investment: None,
            series: Vec::new(),
            last_result: None,
            error: None,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn investment(&self) -> Option<f64> {
        self.investment
    }

    pub fn series(&self) -> &[PricePoint] {
        &self.series
    }

    pub fn chart_state(&self) -> ChartState {
        self.charts.state()
    }

    pub fn last_result(&self) -> Option<&InvestmentResult> {
        self.last_result.as_ref()
    }

    /// Message of the last failed action, cleared by the next successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
    }

    /// Set the investment value from user input; blank input clears it
    pub fn set_investment(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            self.investment = None;
            return Ok(());
        }

        match input.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {
                self.investment = Some(value);
                Ok(())
            }
            _ => Err(format!("❌ Investment value must be a positive number (got '{}')", input)),
        }
    }

    pub fn range_status(&self, today: NaiveDate) -> RangeStatus {
        range_service::check_range(self.start_date, self.end_date, today)
    }

    fn fail<T>(&mut self, message: String) -> Result<T, String> {
        self.error = Some(message.clone());
        Err(message)
    }

    /// Fetch the series for the current range and keep it
    ///
    /// A failed fetch leaves the previous series (and chart) untouched.
    async fn fetch_range(&mut self, today: NaiveDate) -> Result<(), String> {
        let status = self.range_status(today);
        let (Some(start), Some(end), true) = (self.start_date, self.end_date, status.enabled) else {
            let reason = status.error.unwrap_or_else(|| "Date range is not valid.".to_string());
            return self.fail(format!("❌ {}", reason));
        };

        match self.source.fetch_series(start, end).await {
            Ok(series) => {
                debug!("Storing {} price points for {} .. {}", series.len(), start, end);
                self.series = series;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching data: {}", e);
                self.fail(format!("❌ Failed to fetch gold prices: {}", e))
            }
        }
    }

    fn redraw(&mut self) -> Result<(), String> {
        if let Err(e) = self.charts.replace_series(&self.series) {
            error!("Chart rendering failed: {}", e);
            return self.fail(format!("❌ {}", e));
        }
        Ok(())
    }

    /// Fetch the current range and redraw the chart; returns the number of points
    pub async fn update_graph(&mut self, today: NaiveDate) -> Result<usize, String> {
        self.fetch_range(today).await?;
        self.redraw()?;
        info!("Graph updated with {} points", self.series.len());
        Ok(self.series.len())
    }

    /// Refresh the series and search it for the best buy/sell window
    ///
    /// `Ok(None)` means the range holds no profitable window.
    pub async fn calculate_returns(
        &mut self,
        today: NaiveDate,
    ) -> Result<Option<InvestmentResult>, String> {
        let Some(principal) = self.investment else {
            return self.fail("❌ Please enter the investment value.".to_string());
        };

        self.fetch_range(today).await?;
        if let Err(e) = self.redraw() {
            // the data is fresh, a missing chart should not hide the answer
            warn!("Computing returns without a chart: {}", e);
        }

        let result = match optimizer_service::find_best_investment(&self.series, principal) {
            Ok(result) => result,
            Err(e) => return self.fail(format!("❌ {}", e)),
        };

        match &result {
            Some(r) => info!(
                "💰 Best window {} -> {}: {:.2} on {:.2}",
                r.buy_date, r.sell_date, r.profit, r.principal
            ),
            None => info!("No profitable window in {} points", self.series.len()),
        }

        self.last_result = result.clone();
        Ok(result)
    }

    /// Back to the initial state: default range, nothing loaded, no chart
    pub fn reset(&mut self, today: NaiveDate) {
        let (start, end) = range_service::default_range(today);
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.investment = None;
        self.series.clear();
        self.last_result = None;
        self.error = None;
        self.charts.shutdown();
        debug!("Session reset to {} .. {}", start, end);
    }

    pub fn shutdown(&mut self) {
        self.charts.shutdown();
    }
}
