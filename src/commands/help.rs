use crate::utils::{get_cooldown_seconds, Table};

pub fn execute() -> Result<String, String> {
    let mut table = Table::new(&["Command", "Description"]);
    table.add_row(&["start <YYYY-MM-DD>", "Set the start of the date range"]);
    table.add_row(&["end <YYYY-MM-DD>", "Set the end of the date range"]);
    table.add_row(&["invest <amount>", "Set the investment value (blank clears it)"]);
    table.add_row(&["update", "Fetch gold prices and redraw the chart"]);
    table.add_row(&["calc", "Fetch, redraw and find the best buy/sell dates"]);
    table.add_row(&["reset", "Restore the default range and clear everything"]);
    table.add_row(&["status", "Show the current session"]);
    table.add_row(&["help", "Show this help message"]);
    table.add_row(&["quit | exit", "Remove the chart and leave"]);

    Ok(format!(
        "📖 Gold Price Tracker\n{}Network commands have a {}-second cooldown. Range is limited to 365 days.",
        table,
        get_cooldown_seconds()
    ))
}
