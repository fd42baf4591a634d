// ═══════════════════════════════════════════════════════════════════
// Error Type Tests — display formatting and conversions
// ═══════════════════════════════════════════════════════════════════

use dividend_machine_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("redemption rate must be 1-10".into());
        assert_eq!(err.to_string(), "Validation failed: redemption rate must be 1-10");
    }

    #[test]
    fn plan_not_found() {
        let err = CoreError::PlanNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Plan not found: abc-123");
    }

    #[test]
    fn data_integrity() {
        let err = CoreError::DataIntegrity("income share is negative".into());
        assert_eq!(
            err.to_string(),
            "Data integrity violation: income share is negative"
        );
    }

    #[test]
    fn api_error_names_the_provider() {
        let err = CoreError::Api {
            provider: "Gemini".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API error (Gemini): rate limited");
    }

    #[test]
    fn network_error() {
        let err = CoreError::Network("connection reset".into());
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn serialization_error() {
        let err = CoreError::Serialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Serialization error: unexpected EOF");
    }
}

mod conversions {
    use super::*;

    #[test]
    fn serde_json_errors_become_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync>() {}
        assert_error::<CoreError>();
    }
}
