//! Investment window models

use chrono::NaiveDate;

/// Best buy/sell window found for a principal
///
/// Only produced when the window is strictly profitable. `profit` is the
/// absolute currency gain, not a ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentResult {
    pub principal: f64,
    pub profit: f64,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub buy_price: f64,
    pub sell_price: f64,
}

impl InvestmentResult {
    /// Profit relative to the principal
    pub fn return_ratio(&self) -> f64 {
        self.profit / self.principal
    }

    /// Value of the position on the sell date
    pub fn final_value(&self) -> f64 {
        self.principal + self.profit
    }
}
