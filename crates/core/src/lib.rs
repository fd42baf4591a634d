pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::time::Instant;

use uuid::Uuid;

use errors::CoreError;
use models::{
    analytics::{AggregateStats, FundExposure},
    plan::Plan,
    registry::Registry,
    simulation::SimulationPoint,
};
use providers::traits::AdvisoryProvider;
use services::{
    advisory_service::AdvisoryService,
    allocation::derive_allocation,
    analytics_service::AnalyticsService,
    plan_service::{PlanService, SubscriptionReceipt},
    protection::{ProtectionPolicy, ProtectionStatus},
    scheduler::RecomputeScheduler,
    simulation_service::{MarketReturns, ReturnSource, SimulationService},
};

/// Horizon choices offered by the dashboard, in months (1 to 5 years).
pub const HORIZON_OPTIONS: [u32; 5] = [12, 24, 36, 48, 60];

/// Main entry point for the Dividend Machine core library.
///
/// Owns the plan registry, the in-progress edit buffer for the selected
/// plan, the cached simulation run, and all services needed to operate on
/// them. The edit buffer is deliberately separate from the committed
/// registry copy: field changes accumulate in the draft and only
/// `commit_changes` writes them through.
#[must_use]
pub struct DividendMachine {
    registry: Registry,
    /// Draft copy of the selected plan — the two-phase edit buffer
    draft: Option<Plan>,
    /// Simulation horizon in months
    horizon: u32,
    /// Most recent simulation run for the draft, if any
    simulation: Vec<SimulationPoint>,
    scheduler: RecomputeScheduler,
    plan_service: PlanService,
    simulation_service: SimulationService,
    analytics_service: AnalyticsService,
    advisory_service: AdvisoryService,
    protection: ProtectionPolicy,
}

impl std::fmt::Debug for DividendMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DividendMachine")
            .field("plans", &self.registry.len())
            .field("selected", &self.registry.selected)
            .field("horizon", &self.horizon)
            .field("simulation_points", &self.simulation.len())
            .finish()
    }
}

impl DividendMachine {
    /// Create an empty machine with no plans and no advisory provider.
    pub fn new() -> Self {
        Self::build(AdvisoryService::disabled())
    }

    /// Create an empty machine with an advisory provider attached.
    pub fn with_advisory(provider: Box<dyn AdvisoryProvider>) -> Self {
        Self::build(AdvisoryService::new(provider))
    }

    // ── Subscription ────────────────────────────────────────────────

    /// Complete a subscription: validate, create the plan, append it to
    /// the registry, select it, and schedule a simulation recompute.
    /// Returns the receipt with the new plan id and order number.
    pub fn subscribe(
        &mut self,
        group_id: &str,
        amount: f64,
        rate: u32,
        day: u32,
    ) -> Result<SubscriptionReceipt, CoreError> {
        let receipt = self
            .plan_service
            .create_from_subscription(&mut self.registry, group_id, amount, rate, day)?;
        self.select_plan(receipt.plan_id)?;
        Ok(receipt)
    }

    // ── Registry access ─────────────────────────────────────────────

    /// All plans, oldest subscription first.
    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.registry.plans
    }

    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn get_plan(&self, id: Uuid) -> Option<&Plan> {
        self.registry.get(id)
    }

    // ── Selection & edit buffer ─────────────────────────────────────

    /// Open a plan in the dashboard: select it and load a fresh draft from
    /// the committed copy, discarding any previous draft.
    pub fn select_plan(&mut self, id: Uuid) -> Result<(), CoreError> {
        let plan = self
            .registry
            .get(id)
            .ok_or_else(|| CoreError::PlanNotFound(id.to_string()))?
            .clone();
        self.registry.selected = Some(id);
        self.draft = Some(plan);
        self.simulation.clear();
        self.scheduler.schedule(Instant::now());
        Ok(())
    }

    /// Return to the overview: clear selection, draft, and pending work.
    pub fn deselect(&mut self) {
        self.registry.selected = None;
        self.draft = None;
        self.simulation.clear();
        self.scheduler.cancel();
    }

    /// The committed copy of the selected plan.
    #[must_use]
    pub fn selected_plan(&self) -> Option<&Plan> {
        self.registry.selected_plan()
    }

    /// The in-progress edit buffer for the selected plan.
    #[must_use]
    pub fn draft(&self) -> Option<&Plan> {
        self.draft.as_ref()
    }

    /// Change the draft's redemption rate, re-deriving all three fund
    /// weights via the allocation policy.
    pub fn set_draft_rate(&mut self, rate: u32) -> Result<(), CoreError> {
        let split = derive_allocation(rate)?;
        let draft = self.draft_mut()?;
        draft.redemption_rate = rate;
        for (holding, weight) in draft.funds.iter_mut().zip(split.as_weights()) {
            holding.weight = weight;
        }
        self.scheduler.schedule(Instant::now());
        Ok(())
    }

    /// Change the draft's redemption day of month.
    pub fn set_draft_day(&mut self, day: u32) -> Result<(), CoreError> {
        use models::plan::{MAX_REDEMPTION_DAY, MIN_REDEMPTION_DAY};
        if !(MIN_REDEMPTION_DAY..=MAX_REDEMPTION_DAY).contains(&day) {
            return Err(CoreError::ValidationError(format!(
                "Redemption day {day} is outside [{MIN_REDEMPTION_DAY}, {MAX_REDEMPTION_DAY}]"
            )));
        }
        self.draft_mut()?.redemption_day = day;
        self.scheduler.schedule(Instant::now());
        Ok(())
    }

    /// Rename the draft.
    pub fn set_draft_name(&mut self, name: impl Into<String>) -> Result<(), CoreError> {
        self.draft_mut()?.name = name.into();
        Ok(())
    }

    /// Flip the draft's manual pause. Returns the new flag value.
    pub fn toggle_draft_manual_pause(&mut self) -> Result<bool, CoreError> {
        let draft = self.draft_mut()?;
        draft.is_manual_pause = !draft.is_manual_pause;
        let flag = draft.is_manual_pause;
        self.scheduler.schedule(Instant::now());
        Ok(flag)
    }

    /// Persist the edit buffer over the registry's authoritative copy
    /// (the "confirm changes" action).
    pub fn commit_changes(&mut self) -> Result<(), CoreError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| CoreError::ValidationError("No plan selected".into()))?;
        self.plan_service.commit(&mut self.registry, draft)
    }

    /// Throw away draft edits and reload from the committed copy.
    pub fn discard_changes(&mut self) -> Result<(), CoreError> {
        let id = self
            .registry
            .selected
            .ok_or_else(|| CoreError::ValidationError("No plan selected".into()))?;
        self.draft = self.registry.get(id).cloned();
        self.scheduler.schedule(Instant::now());
        Ok(())
    }

    // ── Simulation ──────────────────────────────────────────────────

    /// Set the simulation horizon. Must be one of [`HORIZON_OPTIONS`].
    pub fn set_horizon(&mut self, months: u32) -> Result<(), CoreError> {
        if !HORIZON_OPTIONS.contains(&months) {
            return Err(CoreError::ValidationError(format!(
                "Horizon {months} months is not one of {HORIZON_OPTIONS:?}"
            )));
        }
        self.horizon = months;
        self.scheduler.schedule(Instant::now());
        Ok(())
    }

    #[must_use]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Run the simulation for the draft immediately with the product's
    /// stochastic market model, cache it, and return the points.
    pub fn run_simulation(&mut self) -> Result<&[SimulationPoint], CoreError> {
        let mut returns = MarketReturns::new();
        self.run_simulation_with(&mut returns)
    }

    /// Run the simulation with a caller-supplied return source (seeded or
    /// fixed), cache it, and return the points.
    pub fn run_simulation_with(
        &mut self,
        returns: &mut dyn ReturnSource,
    ) -> Result<&[SimulationPoint], CoreError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| CoreError::ValidationError("No plan selected".into()))?;
        self.simulation = self
            .simulation_service
            .simulate(draft, self.horizon, returns)?;
        self.scheduler.cancel();
        Ok(&self.simulation)
    }

    /// Drive the debounced recompute: if a scheduled recompute's quiescence
    /// has elapsed at `now`, run the simulation and return the fresh
    /// points; otherwise return `None`.
    pub fn poll_recompute(
        &mut self,
        now: Instant,
    ) -> Result<Option<&[SimulationPoint]>, CoreError> {
        if !self.scheduler.poll(now) || self.draft.is_none() {
            return Ok(None);
        }
        self.run_simulation().map(Some)
    }

    /// `true` while a recompute is scheduled but not yet run.
    #[must_use]
    pub fn recompute_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// The most recent simulation run for the draft (empty before the
    /// first run).
    #[must_use]
    pub fn last_simulation(&self) -> &[SimulationPoint] {
        &self.simulation
    }

    // ── Live status ─────────────────────────────────────────────────

    /// The draft's latest value: the final simulated principal when a run
    /// exists, else the plan's last known value.
    #[must_use]
    pub fn live_value(&self) -> Option<f64> {
        let draft = self.draft.as_ref()?;
        Some(
            self.simulation
                .last()
                .map_or(draft.current_principal, |p| p.principal),
        )
    }

    /// Pause/running status of the draft at its live value.
    #[must_use]
    pub fn live_protection_status(&self) -> Option<ProtectionStatus> {
        let draft = self.draft.as_ref()?;
        let value = self.live_value()?;
        Some(self.protection.evaluate(
            value,
            draft.initial_principal,
            draft.is_safety_on,
            draft.is_manual_pause,
        ))
    }

    /// Performance percent at the live value: the final simulated point
    /// when a run exists, else the committed baseline numbers.
    #[must_use]
    pub fn live_performance_percent(&self) -> Option<f64> {
        let draft = self.draft.as_ref()?;
        Some(
            self.simulation
                .last()
                .map_or_else(|| draft.live_performance_percent(), |p| p.performance_percent),
        )
    }

    /// Whether the draft's live value has recovered far enough for the UI
    /// to suggest resuming (advisory only — resume stays manual).
    #[must_use]
    pub fn resume_notice_reached(&self) -> Option<bool> {
        let draft = self.draft.as_ref()?;
        let value = self.live_value()?;
        Some(
            self.protection
                .resume_notice_reached(value, draft.initial_principal),
        )
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Totals across all plans for the overview cards.
    #[must_use]
    pub fn aggregate_stats(&self) -> AggregateStats {
        self.analytics_service.aggregate_stats(&self.registry)
    }

    /// Cross-plan fund exposure for the overview allocation chart.
    #[must_use]
    pub fn fund_exposure(&self) -> Vec<FundExposure> {
        self.analytics_service.fund_exposure(&self.registry)
    }

    // ── Advisory ────────────────────────────────────────────────────

    /// Advisory commentary for a plan. Provider failures never surface —
    /// the fixed fallback text is returned instead. Only an unknown plan
    /// id is an error.
    pub async fn get_advice(&self, id: Uuid) -> Result<String, CoreError> {
        let plan = self
            .registry
            .get(id)
            .ok_or_else(|| CoreError::PlanNotFound(id.to_string()))?;
        Ok(self
            .advisory_service
            .get_advice(plan.initial_principal, plan.redemption_rate, plan.is_safety_on)
            .await)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the registry as pretty JSON (unencrypted snapshot for
    /// debugging/display — nothing persists across sessions).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.registry)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize registry: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn draft_mut(&mut self) -> Result<&mut Plan, CoreError> {
        self.draft
            .as_mut()
            .ok_or_else(|| CoreError::ValidationError("No plan selected".into()))
    }

    fn build(advisory_service: AdvisoryService) -> Self {
        Self {
            registry: Registry::new(),
            draft: None,
            horizon: HORIZON_OPTIONS[0],
            simulation: Vec::new(),
            scheduler: RecomputeScheduler::default(),
            plan_service: PlanService::new(),
            simulation_service: SimulationService::new(),
            analytics_service: AnalyticsService::new(),
            advisory_service,
            protection: ProtectionPolicy::new(),
        }
    }
}

impl Default for DividendMachine {
    fn default() -> Self {
        Self::new()
    }
}
