//! # Trust-Boundary Inversion
//!
//! `encrypt_with_rate_limit` attaches the sender's bucket snapshot to the
//! envelope. That snapshot sits outside the GCM tag, so anyone on the path
//! can rewrite it. If the receiver applied it, an attacker could:
//!
//! - inflate the receiver's capacity and disable throttling
//! - drain the receiver's bucket and deny service
//! - inject NaN or negative values to corrupt the bucket
//!
//! ## Defence
//!
//! The default policy only logs the snapshot. The opt-in `Apply` policy
//! validates it and only acts after the payload authenticates. A snapshot
//! that does not parse is ignored under either policy.

#[cfg(test)]
mod tests {
    use relay_telemetry::{PrometheusTelemetry, TelemetryConfig};
    use rg_03_rate_limiter::RateLimiterApi;
    use rg_05_token_issuer::{RateLimitTokenApi, RateLimitedTokenIssuer};
    use serde_json::{json, Value};
    use shared_types::{MockTimeSource, RateLimitInfoPolicy, SecurityConfig, SecurityEvent};
    use std::sync::Arc;

    const T0: u64 = 1_700_000_000_000;

    fn receiver(policy: RateLimitInfoPolicy) -> (RateLimitedTokenIssuer, Arc<PrometheusTelemetry>) {
        let clock = MockTimeSource::shared(T0);
        let sink = Arc::new(PrometheusTelemetry::new(&TelemetryConfig::default()).unwrap());
        let issuer =
            RateLimitedTokenIssuer::from_config_with_clock(&SecurityConfig::default(), "k", clock)
                .unwrap()
                .with_policy(policy)
                .with_telemetry(sink.clone());
        (issuer, sink)
    }

    fn with_info(issuer: &RateLimitedTokenIssuer, info: Value) -> String {
        let wire = issuer.encrypt_with_rate_limit("payload", "secret").unwrap();
        let mut envelope: Value = serde_json::from_str(&wire).unwrap();
        envelope["rateLimitInfo"] = info;
        envelope.to_string()
    }

    #[test]
    fn test_inflated_capacity_ignored_by_default() {
        let (issuer, sink) = receiver(RateLimitInfoPolicy::Informational);
        let wire = with_info(
            &issuer,
            json!({"tokens": 1e9, "bucketSize": 1e9, "refillRate": 1e9, "timestamp": T0}),
        );

        assert_eq!(issuer.decrypt_with_rate_limit(&wire, "secret").unwrap(), "payload");
        assert_eq!(issuer.limiter().capacity(), 10.0);
        assert_eq!(sink.count(SecurityEvent::RateLimitInfoIgnored), 1);
        assert_eq!(sink.count(SecurityEvent::RateLimitInfoApplied), 0);

        for _ in 0..10 {
            assert!(issuer.limiter().try_acquire());
        }
        assert!(!issuer.limiter().try_acquire());
    }

    #[test]
    fn test_drain_attempt_ignored_by_default() {
        let (issuer, _) = receiver(RateLimitInfoPolicy::Informational);
        let wire = with_info(
            &issuer,
            json!({"tokens": 0.0, "bucketSize": 0.001, "refillRate": 0.001, "timestamp": T0}),
        );

        issuer.decrypt_with_rate_limit(&wire, "secret").unwrap();
        assert_eq!(issuer.limiter().available_tokens(), 10.0);
    }

    #[test]
    fn test_apply_policy_rejects_corrupt_values() {
        let (issuer, sink) = receiver(RateLimitInfoPolicy::Apply);

        for info in [
            json!({"tokens": 5.0, "bucketSize": -10.0, "refillRate": 1.0, "timestamp": T0}),
            json!({"tokens": 5.0, "bucketSize": 10.0, "refillRate": 0.0, "timestamp": T0}),
        ] {
            let wire = with_info(&issuer, info);
            issuer.decrypt_with_rate_limit(&wire, "secret").unwrap();
        }

        let state = issuer.limiter().snapshot();
        assert_eq!(state.capacity, 10.0);
        assert_eq!(state.refill_rate, 1.0);
        assert_eq!(sink.count(SecurityEvent::RateLimitInfoIgnored), 2);
    }

    #[test]
    fn test_apply_policy_clamps_tokens() {
        let (issuer, _) = receiver(RateLimitInfoPolicy::Apply);
        let wire = with_info(
            &issuer,
            json!({"tokens": 500.0, "bucketSize": 4.0, "refillRate": 2.0, "timestamp": T0}),
        );

        issuer.decrypt_with_rate_limit(&wire, "secret").unwrap();
        let state = issuer.limiter().snapshot();
        assert_eq!(state.tokens, 4.0);
        assert_eq!(state.capacity, 4.0);
    }

    #[test]
    fn test_unauthenticated_envelope_never_touches_limiter() {
        let (issuer, _) = receiver(RateLimitInfoPolicy::Apply);
        let wire = with_info(
            &issuer,
            json!({"tokens": 1e9, "bucketSize": 1e9, "refillRate": 1e9, "timestamp": T0}),
        );

        assert!(issuer.decrypt_with_rate_limit(&wire, "guessed").is_err());
        assert_eq!(issuer.limiter().capacity(), 10.0);
    }

    #[test]
    fn test_non_numeric_info_is_ignored_under_both_policies() {
        for policy in [RateLimitInfoPolicy::Informational, RateLimitInfoPolicy::Apply] {
            let (issuer, sink) = receiver(policy);
            let wire = with_info(&issuer, json!({"tokens": "lots"}));

            assert_eq!(issuer.decrypt_with_rate_limit(&wire, "secret").unwrap(), "payload");
            assert_eq!(issuer.limiter().capacity(), 10.0);
            assert_eq!(issuer.limiter().available_tokens(), 10.0);
            assert_eq!(sink.count(SecurityEvent::RateLimitInfoIgnored), 1);
            assert_eq!(sink.count(SecurityEvent::RateLimitInfoApplied), 0);
        }
    }

    #[test]
    fn test_non_numeric_info_with_wrong_secret_still_fails() {
        let (issuer, _) = receiver(RateLimitInfoPolicy::Apply);
        let wire = with_info(&issuer, json!({"tokens": "lots"}));

        let err = issuer.decrypt_with_rate_limit(&wire, "guessed").unwrap_err();
        assert_eq!(
            err.message(),
            "Failed to decrypt with rate limit: Failed to decrypt payload"
        );
    }
}
