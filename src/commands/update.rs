use chrono::NaiveDate;
use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;

pub async fn execute<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    today: NaiveDate,
) -> Result<String, String> {
    tracing::info!("📈 Update command for {:?} .. {:?}", session.start_date(), session.end_date());

    let points = session.update_graph(today).await?;
    if points == 0 {
        return Ok("📈 No quotations in the selected range, chart is empty".to_string());
    }

    Ok(format!("📈 Chart updated with {} quotations", points))
}
