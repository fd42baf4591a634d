use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for advisory-text generators.
///
/// The product ships a language-model backed implementation; tests plug in
/// mocks. Providers may fail — converting failures into the user-facing
/// fallback is the advisory service's job, not the provider's.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Produce a short free-form commentary for a plan configuration:
    /// the invested principal, the monthly redemption rate (percent), and
    /// whether the 80% principal-protection rule is enabled.
    async fn get_advice(
        &self,
        principal: f64,
        rate: u32,
        safety_on: bool,
    ) -> Result<String, CoreError>;
}
