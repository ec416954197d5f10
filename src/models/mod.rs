//! Data models for the gold price tracker
//!
//! Plain data passed between the client, services and commands.

pub mod chart;
pub mod investment;
pub mod price;
pub mod range;

pub use chart::ChartState;
pub use investment::InvestmentResult;
pub use price::{PricePoint, PriceSeries};
pub use range::RangeStatus;
