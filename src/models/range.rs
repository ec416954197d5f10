//! Date range status models

/// Whether a date range may be fetched, and why not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeStatus {
    pub enabled: bool,
    pub error: Option<String>,
}

impl RangeStatus {
    pub fn ok() -> Self {
        Self {
            enabled: true,
            error: None,
        }
    }

    pub fn blocked(reason: &str) -> Self {
        Self {
            enabled: false,
            error: Some(reason.to_string()),
        }
    }
}
