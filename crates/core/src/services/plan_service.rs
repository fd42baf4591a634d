use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::fund::{available_funds, find_group, FundHolding};
use crate::models::plan::{Plan, MAX_REDEMPTION_DAY, MIN_REDEMPTION_DAY};
use crate::models::registry::Registry;
use crate::services::allocation::{derive_allocation, AllocationSplit};

/// Minimum subscription amount (inclusive).
pub const MIN_SUBSCRIPTION_AMOUNT: f64 = 200_000.0;
/// Maximum subscription amount (inclusive).
pub const MAX_SUBSCRIPTION_AMOUNT: f64 = 5_000_000.0;

/// Confirmation handed back after a successful subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionReceipt {
    /// Id of the newly created plan
    pub plan_id: Uuid,

    /// Order number in `ORD-YYYYMMDD-NNNN` form
    pub order_no: String,
}

/// Manages the plan registry: subscription, the id-keyed mutations, and the
/// draft commit. Validation happens before any state change — a rejected
/// operation leaves the registry untouched.
pub struct PlanService;

impl PlanService {
    pub fn new() -> Self {
        Self
    }

    /// Create a plan from a completed subscription and append it to the
    /// registry.
    ///
    /// Rules:
    /// - the fund group must exist in the catalog
    /// - `200_000 <= amount <= 5_000_000`, both bounds inclusive
    /// - rate and day must be in range
    ///
    /// The new plan starts with safety on, no manual pause, nothing
    /// withdrawn, and current value equal to the subscription amount.
    pub fn create_from_subscription(
        &self,
        registry: &mut Registry,
        group_id: &str,
        amount: f64,
        rate: u32,
        day: u32,
    ) -> Result<SubscriptionReceipt, CoreError> {
        let group = find_group(group_id).ok_or_else(|| {
            CoreError::ValidationError(if group_id.is_empty() {
                "No fund group selected".to_string()
            } else {
                format!("Unknown fund group '{group_id}'")
            })
        })?;

        if !(MIN_SUBSCRIPTION_AMOUNT..=MAX_SUBSCRIPTION_AMOUNT).contains(&amount) {
            return Err(CoreError::ValidationError(format!(
                "Subscription amount {amount} is outside \
                 [{MIN_SUBSCRIPTION_AMOUNT}, {MAX_SUBSCRIPTION_AMOUNT}]"
            )));
        }
        if !(MIN_REDEMPTION_DAY..=MAX_REDEMPTION_DAY).contains(&day) {
            return Err(CoreError::ValidationError(format!(
                "Redemption day {day} is outside [{MIN_REDEMPTION_DAY}, {MAX_REDEMPTION_DAY}]"
            )));
        }

        let split = derive_allocation(rate)?;
        let funds = Self::build_holdings(&group.fund_ids, split)?;

        let plan = Plan::new(group.name.clone(), amount, rate, day, funds);
        plan.validate()?;

        let receipt = SubscriptionReceipt {
            plan_id: plan.id,
            order_no: Self::order_number(),
        };
        registry.plans.push(plan);
        Ok(receipt)
    }

    /// Change a plan's redemption rate, re-deriving all three fund weights.
    /// Affects every subsequent simulation run for that plan.
    pub fn update_rate(
        &self,
        registry: &mut Registry,
        id: Uuid,
        new_rate: u32,
    ) -> Result<(), CoreError> {
        let split = derive_allocation(new_rate)?;
        let plan = registry
            .get_mut(id)
            .ok_or_else(|| CoreError::PlanNotFound(id.to_string()))?;
        plan.redemption_rate = new_rate;
        Self::apply_split(plan, split);
        Ok(())
    }

    /// Flip the user-forced pause flag.
    pub fn toggle_manual_pause(&self, registry: &mut Registry, id: Uuid) -> Result<bool, CoreError> {
        let plan = registry
            .get_mut(id)
            .ok_or_else(|| CoreError::PlanNotFound(id.to_string()))?;
        plan.is_manual_pause = !plan.is_manual_pause;
        Ok(plan.is_manual_pause)
    }

    /// Relabel a plan.
    pub fn rename(
        &self,
        registry: &mut Registry,
        id: Uuid,
        new_name: impl Into<String>,
    ) -> Result<(), CoreError> {
        let plan = registry
            .get_mut(id)
            .ok_or_else(|| CoreError::PlanNotFound(id.to_string()))?;
        plan.name = new_name.into();
        Ok(())
    }

    /// Overwrite the registry's authoritative copy with an edited draft
    /// (the "confirm changes" action of the two-phase edit).
    /// The draft is validated first; a bad draft leaves the committed copy
    /// untouched.
    pub fn commit(&self, registry: &mut Registry, draft: &Plan) -> Result<(), CoreError> {
        draft.validate()?;
        let slot = registry
            .get_mut(draft.id)
            .ok_or_else(|| CoreError::PlanNotFound(draft.id.to_string()))?;
        *slot = draft.clone();
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Resolve catalog funds for a group and weight them growth / income /
    /// hedge in holding order.
    fn build_holdings(
        fund_ids: &[String; 3],
        split: AllocationSplit,
    ) -> Result<Vec<FundHolding>, CoreError> {
        let catalog = available_funds();
        let weights = split.as_weights();

        fund_ids
            .iter()
            .zip(weights)
            .map(|(fund_id, weight)| {
                catalog
                    .iter()
                    .find(|f| &f.id == fund_id)
                    .cloned()
                    .map(|f| f.with_weight(weight))
                    .ok_or_else(|| {
                        CoreError::DataIntegrity(format!(
                            "Fund group references unknown fund id '{fund_id}'"
                        ))
                    })
            })
            .collect()
    }

    fn apply_split(plan: &mut Plan, split: AllocationSplit) {
        // Holding order is growth, income, hedge by convention.
        for (holding, weight) in plan.funds.iter_mut().zip(split.as_weights()) {
            holding.weight = weight;
        }
    }

    fn order_number() -> String {
        let date = Utc::now().date_naive().format("%Y%m%d");
        let serial: u32 = rand::rng().random_range(1000..10_000);
        format!("ORD-{date}-{serial}")
    }
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new()
    }
}
