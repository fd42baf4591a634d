use crate::providers::traits::AdvisoryProvider;

/// Fixed text returned whenever the advisory provider fails or none is
/// configured.
pub const FALLBACK_ADVICE: &str =
    "The advisory service is currently unavailable. Please try again later.";

/// Wraps an optional [`AdvisoryProvider`] and guarantees advice retrieval
/// never fails outward: any provider error, timeout, or missing
/// configuration yields [`FALLBACK_ADVICE`] instead of propagating.
///
/// The advisory call is the only asynchronous I/O in the core and has no
/// ordering dependency on the simulation — a failure here must never block
/// or corrupt plan state.
pub struct AdvisoryService {
    provider: Option<Box<dyn AdvisoryProvider>>,
}

impl AdvisoryService {
    /// A service with no provider — always answers with the fallback.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn new(provider: Box<dyn AdvisoryProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Get advisory text for a plan configuration. Never returns an error.
    pub async fn get_advice(&self, principal: f64, rate: u32, safety_on: bool) -> String {
        match &self.provider {
            Some(provider) => provider
                .get_advice(principal, rate, safety_on)
                .await
                .unwrap_or_else(|_| FALLBACK_ADVICE.to_string()),
            None => FALLBACK_ADVICE.to_string(),
        }
    }
}

impl Default for AdvisoryService {
    fn default() -> Self {
        Self::disabled()
    }
}
