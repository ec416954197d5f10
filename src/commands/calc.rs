use chrono::NaiveDate;
use crate::api::PriceSource;
use crate::models::InvestmentResult;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;
use crate::utils::{format_amount, Align, Table};

/// Render a result the way the result panel shows it
pub fn render_result(result: &InvestmentResult) -> String {
    let mut table = Table::new(&["Investment Result", ""]).align(1, Align::Right);
    table.add_row(&["Investment Value", format_amount(result.principal).as_str()]);
    table.add_row(&["Maximum Return", format_amount(result.profit).as_str()]);
    table.add_row(&["Final Value", format_amount(result.final_value()).as_str()]);
    table.add_row(&["Return", format!("{:.2}%", result.return_ratio() * 100.0).as_str()]);
    table.add_row(&[
        "Suggested Buy Date",
        format!("{} @ {}", result.buy_date, format_amount(result.buy_price)).as_str(),
    ]);
    table.add_row(&[
        "Suggested Sell Date",
        format!("{} @ {}", result.sell_date, format_amount(result.sell_price)).as_str(),
    ]);
    table.to_string()
}

pub async fn execute<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    today: NaiveDate,
) -> Result<String, String> {
    tracing::info!("💰 Calc command with investment {:?}", session.investment());

    match session.calculate_returns(today).await? {
        Some(result) => Ok(render_result(&result)),
        None => Ok("📉 No profitable buy/sell window in the selected range".to_string()),
    }
}
