use chrono::NaiveDate;
use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;
use crate::utils::{format_amount, Table};

pub fn execute<P: PriceSource, S: ChartSurface>(
    session: &TrackerSession<P, S>,
    today: NaiveDate,
) -> Result<String, String> {
    let or_unset = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let range = session.range_status(today);

    let rows = [
        ("Start date", or_unset(session.start_date().map(|d| d.to_string()))),
        ("End date", or_unset(session.end_date().map(|d| d.to_string()))),
        ("Range", range.error.unwrap_or_else(|| "ready".to_string())),
        ("Investment", or_unset(session.investment().map(format_amount))),
        ("Quotations", session.series().len().to_string()),
        ("Chart", session.chart_state().to_string()),
        (
            "Best window",
            or_unset(session.last_result().map(|r| {
                format!("{} -> {} (+{})", r.buy_date, r.sell_date, format_amount(r.profit))
            })),
        ),
    ];

    let mut table = Table::new(&["Session", ""]);
    for (field, value) in &rows {
        table.add_row(&[*field, value.as_str()]);
    }
    if let Some(error) = session.error() {
        table.add_row(&["Last error", error]);
    }

    Ok(table.to_string())
}
