use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::plan::{MAX_REDEMPTION_RATE, MIN_REDEMPTION_RATE};

/// Target three-way split for a plan, percent shares summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSplit {
    /// Equity leg — scales with the redemption rate
    pub growth: u32,
    /// Bond leg — the remainder
    pub income: u32,
    /// Hedge leg — fixed at 10
    pub hedge: u32,
}

/// Map a redemption rate to its target allocation.
///
/// The growth share scales linearly from 20% (rate 1) to 80% (rate 10) and
/// is rounded to the nearest multiple of 10 so displayed steps stay coarse.
/// The hedge leg is a fixed 10%; income takes the remainder.
///
/// Pure and deterministic — the same rate always yields the same triple.
/// A remainder that comes out negative means the formula itself is broken,
/// so it surfaces as a data-integrity error instead of being clamped.
pub fn derive_allocation(rate: u32) -> Result<AllocationSplit, CoreError> {
    if !(MIN_REDEMPTION_RATE..=MAX_REDEMPTION_RATE).contains(&rate) {
        return Err(CoreError::ValidationError(format!(
            "Redemption rate {rate}% is outside [{MIN_REDEMPTION_RATE}, {MAX_REDEMPTION_RATE}]"
        )));
    }

    let raw_growth = 20.0 + (f64::from(rate) - 1.0) * (60.0 / 9.0);
    let growth = ((raw_growth / 10.0).round() * 10.0) as i64;
    let hedge = 10_i64;
    let income = 100 - growth - hedge;

    if income < 0 {
        return Err(CoreError::DataIntegrity(format!(
            "Allocation for rate {rate}% produced a negative income share \
             (growth {growth}, hedge {hedge})"
        )));
    }

    Ok(AllocationSplit {
        growth: growth as u32,
        income: income as u32,
        hedge: hedge as u32,
    })
}

impl AllocationSplit {
    /// Shares in holding order: growth, income, hedge.
    #[must_use]
    pub fn as_weights(&self) -> [u32; 3] {
        [self.growth, self.income, self.hedge]
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.growth + self.income + self.hedge
    }
}
