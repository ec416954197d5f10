//! Test doubles shared by service and command tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use chrono::{Duration, NaiveDate};
use crate::api::{ApiError, PriceSource};
use crate::models::{PricePoint, PriceSeries};
use crate::services::chart_service::{ChartError, ChartSurface};

/// Source answering from a queue of canned responses
pub struct StubSource {
    responses: RefCell<VecDeque<Result<PriceSeries, ApiError>>>,
    pub calls: Cell<usize>,
}

impl StubSource {
    pub fn new(responses: Vec<Result<PriceSeries, ApiError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
        }
    }
}

impl PriceSource for StubSource {
    async fn fetch_series(&self, _start: NaiveDate, _end: NaiveDate) -> Result<PriceSeries, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::RequestError("no canned response".to_string())))
    }
}

#[derive(Default)]
pub struct Counts {
    pub constructed: Cell<usize>,
    pub destroyed: Cell<usize>,
}

/// Surface that only counts lifecycle calls
pub struct CountingSurface(pub Rc<Counts>);

impl ChartSurface for CountingSurface {
    type Chart = ();

    fn construct(&mut self, _series: &[PricePoint]) -> Result<(), ChartError> {
        self.0.constructed.set(self.0.constructed.get() + 1);
        Ok(())
    }

    fn destroy(&mut self, _chart: ()) {
        self.0.destroyed.set(self.0.destroyed.get() + 1);
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Consecutive daily quotations starting on 2024-06-03
pub fn series_of(prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PricePoint::new(start + Duration::days(i as i64), p))
        .collect()
}
