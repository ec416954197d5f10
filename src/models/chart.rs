//! Chart lifecycle models

/// Lifecycle state of the series chart controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// No chart is live
    Empty,
    /// Exactly one chart is live and bound to the current series
    Bound,
}

impl std::fmt::Display for ChartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartState::Empty => write!(f, "empty"),
            ChartState::Bound => write!(f, "bound"),
        }
    }
}
