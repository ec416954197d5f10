/// Extract clean error message from NBP error bodies
/// 
/// NBP prefixes its plain-text errors with the status and reason, like:
/// "404 NotFound - Not Found - Brak danych"
/// 
/// Returns only the meaningful error message:
/// "Brak danych"
pub fn extract_clean_error(error_msg: &str) -> String {
    let trimmed = error_msg.trim();
    if trimmed.is_empty() {
        return "No details provided".to_string();
    }

    // Find the last separator, everything after it is the actual error message
    match trimmed.rfind(" - ") {
        Some(last_sep) if last_sep + 3 < trimmed.len() => trimmed[last_sep + 3..].trim().to_string(),
        _ => trimmed.to_string(),
    }
}
