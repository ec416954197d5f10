pub mod calc;
pub mod help;
pub mod invest;
pub mod range;
pub mod reset;
pub mod status;
pub mod update;

use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::api::PriceSource;
use crate::services::chart_service::ChartSurface;
use crate::services::session_service::TrackerSession;
use crate::utils::check_cooldown;

/// What the console loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print
    Silent,
    /// Print this reply and keep reading
    Reply(String),
    /// Leave the loop
    Quit,
}

/// Map aliases onto the command name they stand for
fn canonical(command: &str) -> &str {
    match command {
        "investment" => "invest",
        "calculate" => "calc",
        "?" => "help",
        "exit" => "quit",
        other => other,
    }
}

/// Commands that call the NBP API and are therefore rate limited
fn hits_network(command: &str) -> bool {
    matches!(command, "update" | "calc")
}

pub async fn handle_line<P: PriceSource, S: ChartSurface>(
    session: &mut TrackerSession<P, S>,
    line: &str,
    today: NaiveDate,
) -> Outcome {
    // Parse command and arguments
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&first, args)) = parts.split_first() else {
        return Outcome::Silent;
    };
    let lowered = first.to_lowercase();
    let command = canonical(&lowered);
    debug!("Command {} with args {:?}", command, args);

    if hits_network(command) {
        if let Err(remaining) = check_cooldown(command).await {
            return Outcome::Reply(format!(
                "⏳ Please wait {} seconds before using this command again.",
                remaining
            ));
        }
    }

    let result = match command {
        "start" => range::execute(session, range::Bound::Start, args, today),
        "end" => range::execute(session, range::Bound::End, args, today),
        "invest" => invest::execute(session, args),
        "update" => update::execute(session, today).await,
        "calc" => calc::execute(session, today).await,
        "reset" => reset::execute(session, today),
        "status" => status::execute(session, today),
        "help" => help::execute(),
        "quit" => return Outcome::Quit,
        _ => Err(format!("❓ Unknown command '{}'. Type `help` for the list of commands.", command)),
    };

    match result {
        Ok(reply) => Outcome::Reply(reply),
        Err(e) => {
            warn!("Error executing command {}: {}", command, e);
            Outcome::Reply(e)
        }
    }
}
