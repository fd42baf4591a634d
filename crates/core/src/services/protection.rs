use crate::models::plan::Plan;

/// Value floor that trips the automatic pause, as a fraction of initial
/// principal.
pub const PAUSE_THRESHOLD: f64 = 0.8;

/// Recovery level at which the UI may suggest resuming, as a fraction of
/// initial principal. Deliberately above the trigger to form a hysteresis
/// band; advisory text only — nothing auto-resumes at this level.
pub const RESUME_NOTICE_THRESHOLD: f64 = 0.85;

/// Whether redemptions are currently allowed to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionStatus {
    /// Redemptions execute on schedule
    Running,
    /// Redemptions suspended — manual pause or the 80% rule
    Paused,
}

impl ProtectionStatus {
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, ProtectionStatus::Paused)
    }
}

/// The principal-protection pause policy.
///
/// Despite the "state machine" framing this is a stateless predicate:
/// nothing is latched, and every evaluation recomputes from current inputs.
/// The manual flag and the automatic trigger are independent — either one
/// suspends redemption, and recovering above the threshold never clears a
/// manual pause.
pub struct ProtectionPolicy;

impl ProtectionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the pause predicate against an arbitrary current value.
    /// Used by the simulation engine month by month, and by live display
    /// logic with the latest known value — the rule is identical.
    #[must_use]
    pub fn evaluate(
        &self,
        current_value: f64,
        initial_principal: f64,
        is_safety_on: bool,
        is_manual_pause: bool,
    ) -> ProtectionStatus {
        let below_floor = current_value < initial_principal * PAUSE_THRESHOLD;
        if is_manual_pause || (is_safety_on && below_floor) {
            ProtectionStatus::Paused
        } else {
            ProtectionStatus::Running
        }
    }

    /// Live status for a plan at its latest known value.
    #[must_use]
    pub fn evaluate_plan(&self, plan: &Plan) -> ProtectionStatus {
        self.evaluate(
            plan.current_principal,
            plan.initial_principal,
            plan.is_safety_on,
            plan.is_manual_pause,
        )
    }

    /// Whether value has recovered far enough that the UI may surface a
    /// "safe to resume" notice. Resume itself is always a manual mutation
    /// of `is_manual_pause`.
    #[must_use]
    pub fn resume_notice_reached(&self, current_value: f64, initial_principal: f64) -> bool {
        current_value >= initial_principal * RESUME_NOTICE_THRESHOLD
    }
}

impl Default for ProtectionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
