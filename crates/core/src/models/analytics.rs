use serde::{Deserialize, Serialize};

/// Totals across every plan in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of plans included
    pub plan_count: usize,

    /// Sum of initial principals
    pub total_initial_principal: f64,

    /// Sum of current values
    pub total_current_value: f64,

    /// Sum of projected next-month withdrawals (`current * rate / 100` per plan)
    pub projected_monthly_withdrawal: f64,
}

/// Cross-plan exposure to a single underlying fund.
///
/// Amounts are nominal allocations (`initial_principal * weight / 100`)
/// summed over every plan that holds the fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundExposure {
    /// Fund display name
    pub name: String,

    /// Total nominal amount allocated across plans
    pub total_amount: f64,

    /// Share of the summed exposure, percent
    pub ratio: f64,
}
