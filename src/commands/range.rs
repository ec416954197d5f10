use chrono::NaiveDate;
use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::range_service::parse_date;
use crate::services::session_service::TrackerSession;

/// Which end of the range a command sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// `start <date>` / `end <date>`; no argument clears the date
pub fn execute<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    bound: Bound,
    args: &[&str],
    today: NaiveDate,
) -> Result<String, String> {
    let date = parse_date(args.first().copied().unwrap_or(""))?;

    let label = match bound {
        Bound::Start => {
            session.set_start_date(date);
            "Start date"
        }
        Bound::End => {
            session.set_end_date(date);
            "End date"
        }
    };
    tracing::debug!("{} set to {:?}", label, date);

    let set_line = match date {
        Some(d) => format!("{} set to {}", label, d),
        None => format!("{} cleared", label),
    };

    let status = session.range_status(today);
    let status_line = match status.error {
        Some(reason) => format!("⚠️ {}", reason),
        None => "✅ Range ready, use `update` or `calc`".to_string(),
    };

    Ok(format!("{}\n{}", set_line, status_line))
}
