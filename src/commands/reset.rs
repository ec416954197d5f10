use chrono::NaiveDate;
use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;

pub fn execute<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    today: NaiveDate,
) -> Result<String, String> {
    session.reset(today);

    let describe = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    Ok(format!(
        "🔄 Session reset, range {} .. {}",
        describe(session.start_date()),
        describe(session.end_date())
    ))
}
