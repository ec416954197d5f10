use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use lazy_static::lazy_static;
use tokio::sync::Mutex;

lazy_static! {
    // Key: command name, Value: unix seconds of the last accepted call
    static ref COMMAND_COOLDOWNS: Mutex<HashMap<String, u64>> =
        Mutex::new(HashMap::new());
}

/// Minimum spacing between two calls of a command that hits the NBP API
const COOLDOWN_SECONDS: u64 = 3;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Check if a command can run now (cooldown not active)
/// Returns Ok(()) and records the call if the cooldown has passed
/// Returns Err(remaining_seconds) if still on cooldown
pub async fn check_cooldown(command: &str) -> Result<(), u64> {
    check_cooldown_at(command, now_secs()).await
}

async fn check_cooldown_at(command: &str, now: u64) -> Result<(), u64> {
    let mut cooldowns = COMMAND_COOLDOWNS.lock().await;

    if let Some(&last_time) = cooldowns.get(command) {
        let elapsed = now.saturating_sub(last_time);
        if elapsed < COOLDOWN_SECONDS {
            return Err(COOLDOWN_SECONDS - elapsed);
        }
    }

    cooldowns.insert(command.to_string(), now);
    Ok(())
}

/// Get the cooldown seconds constant
pub fn get_cooldown_seconds() -> u64 {
    COOLDOWN_SECONDS
}
