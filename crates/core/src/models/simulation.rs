use serde::{Deserialize, Serialize};

/// One simulated month-end record.
///
/// The core generates these — the frontend just charts them. Recomputed
/// whenever principal, rate, or horizon changes; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    /// Month index; 0 is the starting snapshot
    pub month: u32,

    /// Month-end principal, rounded to the nearest whole currency unit
    pub principal: f64,

    /// Cumulative amount withdrawn up to this month, rounded
    pub withdrawn: f64,

    /// Amount withdrawn in this month alone (0 while paused)
    pub monthly_withdrawn: f64,

    /// Whether redemption was suspended this month
    pub is_paused: bool,

    /// Performance vs initial principal, percent.
    /// Keeps fractional precision — only the currency fields round.
    pub performance_percent: f64,
}
