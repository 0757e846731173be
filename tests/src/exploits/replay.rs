//! # Replay Attacks
//!
//! An attacker captures a valid signed or encrypted message and resubmits it
//! later, or pre-dates a forged clock into the future.
//!
//! ## Defence
//!
//! Only the timestamp inside the authenticated payload counts. It must lie in
//! `[now - window, now + 60s]`.

#[cfg(test)]
mod tests {
    use rg_01_message_auth::{MessageAuthenticationApi, MessageAuthenticator};
    use rg_02_payload_cipher::{PayloadCipher, PayloadCipherApi};
    use rg_05_token_issuer::{RateLimitTokenApi, RateLimitedTokenIssuer};
    use serde_json::json;
    use shared_types::{MockTimeSource, SecurityConfig, TimeSource};
    use std::sync::Arc;

    const T0: u64 = 1_700_000_000_000;

    fn authenticator(clock: &Arc<MockTimeSource>) -> MessageAuthenticator {
        MessageAuthenticator::with_secret_key("replay-key")
            .unwrap()
            .with_time_source(clock.clone())
    }

    #[test]
    fn test_captured_message_expires() {
        let clock = MockTimeSource::shared(T0);
        let auth = authenticator(&clock);
        let captured = auth.sign_message("transfer ownership").unwrap();

        clock.advance(300_000);
        assert!(auth.verify_message(&captured).unwrap());

        clock.advance(1);
        assert!(!auth.verify_message(&captured).unwrap());
    }

    #[test]
    fn test_rewriting_outer_timestamp_does_not_help() {
        let clock = MockTimeSource::shared(T0);
        let auth = authenticator(&clock);
        let mut captured = auth.sign_message("old").unwrap();

        clock.advance(600_000);
        captured.timestamp = clock.now_millis();
        assert!(!auth.verify_message(&captured).unwrap());
    }

    #[test]
    fn test_future_dated_message_rejected() {
        let clock = MockTimeSource::shared(T0 + 120_000);
        let future_sender = authenticator(&clock);
        let signed = future_sender.sign_message("from the future").unwrap();

        let receiver_clock = MockTimeSource::shared(T0);
        let receiver = authenticator(&receiver_clock);
        assert!(!receiver.verify_message(&signed).unwrap());

        // Within the 60s skew allowance it is accepted.
        receiver_clock.set(T0 + 60_000);
        assert!(receiver.verify_message(&signed).unwrap());
    }

    #[test]
    fn test_captured_ciphertext_expires() {
        let clock = MockTimeSource::shared(T0);
        let cipher = PayloadCipher::new().with_time_source(clock.clone());
        let captured = cipher.encrypt_payload("one-shot", "secret").unwrap();

        clock.advance(300_001);
        assert!(cipher.decrypt_payload(&captured, "secret").is_err());
    }

    #[test]
    fn test_long_lived_token_still_bounded_by_signing_window() {
        let clock = MockTimeSource::shared(T0);
        let issuer = RateLimitedTokenIssuer::from_config_with_clock(
            &SecurityConfig::default(),
            "replay-key",
            clock.clone(),
        )
        .unwrap();

        let token = issuer
            .create_rate_limit_token(&json!({"scope": "admin"}), 60)
            .unwrap();

        clock.advance(10 * 60 * 1000);
        assert!(!issuer.validate_rate_limit_token(&token).unwrap());
    }
}
