use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::CoreError;
use crate::models::plan::Plan;
use crate::models::simulation::SimulationPoint;
use crate::services::protection::ProtectionPolicy;

/// Source of monthly market-return factors.
///
/// The engine never draws randomness directly — callers inject a source so
/// tests can feed deterministic sequences while the product uses
/// [`MarketReturns`].
pub trait ReturnSource {
    /// Multiplicative factor applied to the principal for one month
    /// (1.0 = flat market).
    fn next_return_factor(&mut self) -> f64;
}

/// The product's stochastic market model: factors drawn uniformly from
/// [0.965, 1.045], i.e. `1 + (U(0,1) * 0.08 - 0.035)`.
pub struct MarketReturns {
    rng: StdRng,
}

impl MarketReturns {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded variant for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MarketReturns {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnSource for MarketReturns {
    fn next_return_factor(&mut self) -> f64 {
        1.0 + (self.rng.random::<f64>() * 0.08 - 0.035)
    }
}

/// A fixed, repeating sequence of return factors. Deterministic — intended
/// for tests and scripted demo scenarios.
pub struct FixedReturns {
    factors: Vec<f64>,
    next: usize,
}

impl FixedReturns {
    /// Cycles through `factors`; an empty slice behaves as a flat market.
    pub fn new(factors: impl Into<Vec<f64>>) -> Self {
        Self {
            factors: factors.into(),
            next: 0,
        }
    }
}

impl ReturnSource for FixedReturns {
    fn next_return_factor(&mut self) -> f64 {
        if self.factors.is_empty() {
            return 1.0;
        }
        let factor = self.factors[self.next % self.factors.len()];
        self.next += 1;
        factor
    }
}

/// Projects a plan's month-by-month trajectory: principal, withdrawals, and
/// performance, with the protection policy evaluated every month.
///
/// Pure computation — no I/O, and the input plan is never mutated.
pub struct SimulationService {
    protection: ProtectionPolicy,
}

impl SimulationService {
    pub fn new() -> Self {
        Self {
            protection: ProtectionPolicy::new(),
        }
    }

    /// Simulate `horizon_months` months forward from the plan's initial
    /// principal. Returns `horizon_months + 1` points; month 0 is the
    /// starting snapshot.
    ///
    /// Each month after the first: apply the drawn market factor, evaluate
    /// the pause predicate against the updated value, then withdraw
    /// `round(principal * rate / 100)` unless paused. Record fields round
    /// to whole currency units while the running principal keeps full
    /// precision; `performance_percent` stays fractional throughout.
    pub fn simulate(
        &self,
        plan: &Plan,
        horizon_months: u32,
        returns: &mut dyn ReturnSource,
    ) -> Result<Vec<SimulationPoint>, CoreError> {
        if plan.initial_principal <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Initial principal must be positive, got {}",
                plan.initial_principal
            )));
        }
        plan.validate()?;

        let initial = plan.initial_principal;
        let mut principal = initial;
        let mut withdrawn = 0.0_f64;
        let mut points = Vec::with_capacity(horizon_months as usize + 1);

        for month in 0..=horizon_months {
            let mut monthly_withdrawn = 0.0;

            if month > 0 {
                principal *= returns.next_return_factor();
            }

            // Re-evaluated fresh each month: the predicate is stateless, so
            // a rebound above the floor resumes withdrawals on its own when
            // only the automatic trigger was active.
            let paused = self
                .protection
                .evaluate(principal, initial, plan.is_safety_on, plan.is_manual_pause)
                .is_paused();

            if month > 0 && !paused {
                monthly_withdrawn = (principal * f64::from(plan.redemption_rate) / 100.0).round();
                principal -= monthly_withdrawn;
                withdrawn += monthly_withdrawn;
            }

            let performance_percent = ((principal + withdrawn) - initial) / initial * 100.0;

            points.push(SimulationPoint {
                month,
                principal: principal.round(),
                withdrawn: withdrawn.round(),
                monthly_withdrawn,
                is_paused: paused,
                performance_percent,
            });
        }

        Ok(points)
    }
}

impl Default for SimulationService {
    fn default() -> Self {
        Self::new()
    }
}
