use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;
use crate::utils::format_amount;

pub fn execute<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    args: &[&str],
) -> Result<String, String> {
    session.set_investment(args.first().copied().unwrap_or(""))?;

    Ok(match session.investment() {
        Some(value) => format!("💵 Investment value set to {}", format_amount(value)),
        None => "💵 Investment value cleared".to_string(),
    })
}
