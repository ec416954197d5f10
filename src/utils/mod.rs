pub mod table;
pub mod errors;
pub mod ratelimit;

pub use table::{Align, Table};
pub use errors::extract_clean_error;
pub use ratelimit::{check_cooldown, get_cooldown_seconds};

/// Format a currency amount for display (two decimals)
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
