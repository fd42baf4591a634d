use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::fund::FundHolding;

/// Lowest allowed monthly redemption rate, percent.
pub const MIN_REDEMPTION_RATE: u32 = 1;
/// Highest allowed monthly redemption rate, percent.
pub const MAX_REDEMPTION_RATE: u32 = 10;
/// Earliest allowed redemption day of month.
pub const MIN_REDEMPTION_DAY: u32 = 1;
/// Latest allowed redemption day of month.
pub const MAX_REDEMPTION_DAY: u32 = 31;

/// One redemption plan — the unit of simulation and the unit a user manages.
///
/// `initial_principal` is immutable after creation and is the fixed reference
/// point for every percentage-of-principal computation. `current_principal`
/// is the latest known net value, used as the display baseline before a
/// simulation run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier, immutable for the plan's lifetime
    pub id: Uuid,

    /// Mutable display label
    pub name: String,

    /// Subscription amount — immutable after creation
    pub initial_principal: f64,

    /// Latest known net value
    pub current_principal: f64,

    /// Fraction of current value withdrawn each redemption event, percent [1, 10]
    pub redemption_rate: u32,

    /// Day of month the redemption nominally executes, [1, 31].
    /// Date computation only — the simulation loop is month-indexed.
    pub redemption_day: u32,

    /// Enables the automatic pause once value drops below 80% of principal
    pub is_safety_on: bool,

    /// User-forced pause, independent of the automatic trigger
    pub is_manual_pause: bool,

    /// Cumulative amount withdrawn to date
    pub total_withdrawn: f64,

    /// Exactly three holdings, ordered growth / income / hedge by convention.
    /// Owned copies — never shared across plans.
    pub funds: Vec<FundHolding>,
}

impl Plan {
    pub fn new(
        name: impl Into<String>,
        initial_principal: f64,
        redemption_rate: u32,
        redemption_day: u32,
        funds: Vec<FundHolding>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initial_principal,
            current_principal: initial_principal,
            redemption_rate,
            redemption_day,
            is_safety_on: true,
            is_manual_pause: false,
            total_withdrawn: 0.0,
            funds,
        }
    }

    /// Sum of the holdings' weights. Expected to be exactly 100.
    #[must_use]
    pub fn weight_sum(&self) -> u32 {
        self.funds.iter().map(|f| f.weight).sum()
    }

    /// Check the plan's structural invariants.
    ///
    /// A weight sum other than 100 or a holding count other than 3 means the
    /// allocation policy misfired — reported as a data-integrity error
    /// rather than corrected in place.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_REDEMPTION_RATE..=MAX_REDEMPTION_RATE).contains(&self.redemption_rate) {
            return Err(CoreError::ValidationError(format!(
                "Redemption rate {}% is outside [{MIN_REDEMPTION_RATE}, {MAX_REDEMPTION_RATE}]",
                self.redemption_rate
            )));
        }
        if !(MIN_REDEMPTION_DAY..=MAX_REDEMPTION_DAY).contains(&self.redemption_day) {
            return Err(CoreError::ValidationError(format!(
                "Redemption day {} is outside [{MIN_REDEMPTION_DAY}, {MAX_REDEMPTION_DAY}]",
                self.redemption_day
            )));
        }
        if self.funds.len() != 3 {
            return Err(CoreError::DataIntegrity(format!(
                "Plan '{}' holds {} funds, expected exactly 3",
                self.name,
                self.funds.len()
            )));
        }
        let sum = self.weight_sum();
        if sum != 100 {
            return Err(CoreError::DataIntegrity(format!(
                "Plan '{}' fund weights sum to {sum}, expected 100",
                self.name
            )));
        }
        Ok(())
    }

    /// The amount the next redemption would pay out at the current value.
    #[must_use]
    pub fn projected_monthly_withdrawal(&self) -> f64 {
        (self.current_principal * f64::from(self.redemption_rate) / 100.0).round()
    }

    /// Performance against initial principal, counting withdrawals already
    /// taken as realized value. Percent with fractional precision.
    #[must_use]
    pub fn live_performance_percent(&self) -> f64 {
        ((self.current_principal + self.total_withdrawn) - self.initial_principal)
            / self.initial_principal
            * 100.0
    }

    /// Nominal currency amount allocated to each holding
    /// (`initial_principal * weight / 100`), in holding order.
    #[must_use]
    pub fn fund_amounts(&self) -> Vec<(String, f64)> {
        self.funds
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    self.initial_principal * f64::from(f.weight) / 100.0,
                )
            })
            .collect()
    }

    /// Nominal execution date of the redemption `month_offset` months after
    /// `start`, on this plan's redemption day. Days beyond the target
    /// month's length clamp to its last day (e.g., day 31 in April → 30).
    #[must_use]
    pub fn redemption_date(&self, start: NaiveDate, month_offset: u32) -> NaiveDate {
        let shifted = start
            .checked_add_months(Months::new(month_offset))
            .unwrap_or(start);
        let day = self.redemption_day.min(days_in_month(shifted.year(), shifted.month()));
        NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), day).unwrap_or(shifted)
    }
}

/// Number of days in a calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
