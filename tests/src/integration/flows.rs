//! # Integration Test Flows
//!
//! ```text
//! [Sender] ──sign / encrypt──→ wire JSON ──→ [Receiver] ──verify / decrypt──→ plaintext
//!                                               │
//!                                               └──→ [Telemetry sink]
//! ```
//!
//! Every flow drives sender and receiver from the same simulated clock.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use relay_telemetry::{PrometheusTelemetry, TelemetryConfig};
    use rg_01_message_auth::{MessageAuthenticationApi, MessageAuthenticator};
    use rg_02_payload_cipher::{PayloadCipher, PayloadCipherApi};
    use rg_03_rate_limiter::{RateLimiterApi, TokenBucketLimiter};
    use rg_04_secret_vault::{SecretVault, SecretVaultApi};
    use rg_05_token_issuer::{RateLimitTokenApi, RateLimitedTokenIssuer};
    use serde_json::json;
    use shared_types::{MockTimeSource, SecurityConfig, SecurityEvent, SignedMessage};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const T0: u64 = 1_700_000_000_000;
    const RELAY_KEY: &str = "relay-shared-key";

    fn authenticator(clock: &Arc<MockTimeSource>) -> MessageAuthenticator {
        MessageAuthenticator::with_secret_key(RELAY_KEY)
            .unwrap()
            .with_time_source(clock.clone())
    }

    fn metrics() -> Arc<PrometheusTelemetry> {
        Arc::new(PrometheusTelemetry::new(&TelemetryConfig::default()).unwrap())
    }

    // =============================================================================
    // SIGNED RELAY MESSAGES
    // =============================================================================

    #[test]
    fn test_signed_message_crosses_the_wire() {
        let clock = MockTimeSource::shared(T0);
        let sender = authenticator(&clock);
        let receiver = authenticator(&clock);

        let signed = sender.sign_message("push refs/heads/main").unwrap();
        let wire = serde_json::to_string(&signed).unwrap();

        clock.advance(2_000);
        assert!(receiver.verify_serialized(&wire).unwrap());

        let decoded: SignedMessage = serde_json::from_str(&wire).unwrap();
        assert!(receiver.verify_message(&decoded).unwrap());
    }

    #[test]
    fn test_receiver_with_other_key_rejects() {
        let clock = MockTimeSource::shared(T0);
        let signed = authenticator(&clock).sign_message("hello").unwrap();

        let stranger = MessageAuthenticator::with_secret_key("not-the-relay-key")
            .unwrap()
            .with_time_source(clock.clone());
        assert!(!stranger.verify_message(&signed).unwrap());
    }

    #[test]
    fn test_verification_events_reach_prometheus() {
        let clock = MockTimeSource::shared(T0);
        let sink = metrics();
        let auth = authenticator(&clock).with_telemetry(sink.clone());

        let signed = auth.sign_message("observed").unwrap();
        assert!(auth.verify_message(&signed).unwrap());

        clock.advance(300_001);
        assert!(!auth.verify_message(&signed).unwrap());
        assert!(!auth.verify_serialized("garbage").unwrap());

        assert_eq!(sink.count(SecurityEvent::MessageSigned), 1);
        assert_eq!(
            sink.count(SecurityEvent::VerificationFailed {
                reason: "timestamp_expired"
            }),
            1
        );
        assert_eq!(
            sink.count(SecurityEvent::VerificationFailed {
                reason: "malformed_envelope"
            }),
            1
        );
    }

    // =============================================================================
    // ENCRYPTED PAYLOADS AND AT-REST SECRETS
    // =============================================================================

    #[test]
    fn test_encrypted_payload_crosses_the_wire() {
        let clock = MockTimeSource::shared(T0);
        let sender = PayloadCipher::new().with_time_source(clock.clone());
        let receiver = PayloadCipher::new().with_time_source(clock.clone());

        let encrypted = sender
            .encrypt_payload(r#"{"repo":"relay","action":"sync"}"#, "payload-secret")
            .unwrap();
        let wire = serde_json::to_string(&encrypted).unwrap();

        clock.advance(10_000);
        assert_eq!(
            receiver.decrypt_payload_str(&wire, "payload-secret").unwrap(),
            r#"{"repo":"relay","action":"sync"}"#
        );
    }

    #[test]
    fn test_vault_protects_relay_key_at_rest() {
        let clock = MockTimeSource::shared(T0);
        let vault = SecretVault::new();

        let stored = vault.encrypt_token(RELAY_KEY, "master-password").unwrap();
        assert!(!stored.contains(RELAY_KEY));

        let recovered = vault.decrypt_token(&stored, "master-password").unwrap();
        let auth = MessageAuthenticator::with_secret_key(&recovered)
            .unwrap()
            .with_time_source(clock.clone());

        let signed = authenticator(&clock).sign_message("after restart").unwrap();
        assert!(auth.verify_message(&signed).unwrap());
    }

    #[tokio::test]
    async fn test_async_variants_interoperate_with_sync() {
        let cipher = PayloadCipher::new();
        let encrypted = cipher
            .encrypt_payload_async("async payload".to_string(), "secret".to_string())
            .await
            .unwrap();
        assert_eq!(
            cipher.decrypt_payload(&encrypted, "secret").unwrap(),
            "async payload"
        );

        let vault = SecretVault::new();
        let stored = vault.encrypt_token("token", "pw").unwrap();
        assert_eq!(
            vault
                .decrypt_token_async(stored, "pw".to_string())
                .await
                .unwrap(),
            "token"
        );
    }

    // =============================================================================
    // TOKENS AND RATE LIMITING
    // =============================================================================

    #[test]
    fn test_issuer_and_external_verifier_agree() {
        let clock = MockTimeSource::shared(T0);
        let issuer =
            RateLimitedTokenIssuer::from_config_with_clock(&SecurityConfig::default(), RELAY_KEY, clock.clone())
                .unwrap();

        let token = issuer
            .create_rate_limit_token(&json!({"client": "cli", "scope": ["read"]}), 5)
            .unwrap();

        // A plain authenticator with the same key accepts the outer signature.
        assert!(authenticator(&clock).verify_serialized(&token).unwrap());
        assert!(issuer.validate_rate_limit_token(&token).unwrap());
        assert_eq!(
            issuer.token_payload(&token).unwrap(),
            Some(json!({"client": "cli", "scope": ["read"]}))
        );
    }

    #[test]
    fn test_shared_limiter_across_issuers() {
        let clock = MockTimeSource::shared(T0);
        let limiter = Arc::new(
            TokenBucketLimiter::new(3.0, 1.0)
                .unwrap()
                .with_time_source(clock.clone()),
        );

        let a = RateLimitedTokenIssuer::new(
            authenticator(&clock),
            Arc::clone(&limiter),
            PayloadCipher::new().with_time_source(clock.clone()),
        );
        let b = RateLimitedTokenIssuer::new(
            authenticator(&clock),
            Arc::clone(&limiter),
            PayloadCipher::new().with_time_source(clock.clone()),
        );

        assert!(a.issue_rate_limited_token(&json!(1), 5).is_ok());
        assert!(b.issue_rate_limited_token(&json!(2), 5).is_ok());
        assert!(a.issue_rate_limited_token(&json!(3), 5).is_ok());
        assert!(b.issue_rate_limited_token(&json!(4), 5).is_err());
        assert_eq!(limiter.available_tokens(), 0.0);
    }

    #[test]
    fn test_limiter_threads_share_budget() {
        let clock = MockTimeSource::shared(T0);
        let limiter = Arc::new(
            TokenBucketLimiter::new(64.0, 1.0)
                .unwrap()
                .with_time_source(clock.clone()),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || (0..32).filter(|_| limiter.consume(1.0)).count())
            })
            .collect();
        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(admitted, 64);
        clock.advance(5_000);
        assert_eq!(limiter.available_tokens(), 5.0);
    }

    #[test]
    fn test_configuration_from_env_wires_every_component() {
        let config = SecurityConfig::from_env();
        config.validate().unwrap();

        let issuer = RateLimitedTokenIssuer::from_config(&config, RELAY_KEY).unwrap();
        let token = issuer.create_default_token(&json!({"env": true})).unwrap();
        assert!(issuer.validate_rate_limit_token(&token).unwrap());

        let wire = issuer.encrypt_with_rate_limit("configured", "secret").unwrap();
        assert_eq!(
            issuer.decrypt_with_rate_limit(&wire, "secret").unwrap(),
            "configured"
        );
    }
}
