use std::collections::HashMap;

use crate::models::analytics::{AggregateStats, FundExposure};
use crate::models::registry::Registry;

/// Computes cross-plan dashboard numbers: totals and fund exposure.
///
/// Pure aggregation over the registry — no I/O, no randomness.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Totals across every plan: initial principal, current value, and the
    /// projected next-month withdrawal sum.
    #[must_use]
    pub fn aggregate_stats(&self, registry: &Registry) -> AggregateStats {
        let mut stats = AggregateStats {
            plan_count: registry.len(),
            total_initial_principal: 0.0,
            total_current_value: 0.0,
            projected_monthly_withdrawal: 0.0,
        };

        for plan in &registry.plans {
            stats.total_initial_principal += plan.initial_principal;
            stats.total_current_value += plan.current_principal;
            stats.projected_monthly_withdrawal += plan.projected_monthly_withdrawal();
        }

        stats
    }

    /// Nominal exposure to each underlying fund across all plans, grouped
    /// by fund name, largest first. Ratios are shares of the summed
    /// exposure (0 when the registry is empty).
    #[must_use]
    pub fn fund_exposure(&self, registry: &Registry) -> Vec<FundExposure> {
        let mut by_name: HashMap<String, f64> = HashMap::new();

        for plan in &registry.plans {
            for (name, amount) in plan.fund_amounts() {
                *by_name.entry(name).or_insert(0.0) += amount;
            }
        }

        let total: f64 = by_name.values().sum();
        let mut exposure: Vec<FundExposure> = by_name
            .into_iter()
            .map(|(name, total_amount)| FundExposure {
                name,
                total_amount,
                ratio: if total > 0.0 {
                    total_amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        exposure.sort_by(|a, b| {
            b.total_amount
                .partial_cmp(&a.total_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        exposure
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
