//! # Tampering and Oracle Probing
//!
//! The attacker modifies signed or encrypted data in flight, or feeds the
//! decryptors crafted input hoping that different failures produce different
//! errors.
//!
//! ## Defence
//!
//! - HMAC and GCM tags bind every byte
//! - Every decryption failure on a path has the same message

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use rg_01_message_auth::{MessageAuthenticationApi, MessageAuthenticator};
    use rg_02_payload_cipher::{PayloadCipher, PayloadCipherApi};
    use rg_04_secret_vault::{SecretVault, SecretVaultApi};
    use shared_types::DecryptionError;

    fn flip_char(s: &str, index: usize) -> String {
        s.char_indices()
            .map(|(i, c)| {
                if i != index {
                    c
                } else if c == '0' {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    #[test]
    fn test_every_signature_position_is_checked() {
        let auth = MessageAuthenticator::with_secret_key("tamper-key").unwrap();
        let signed = auth.sign_message("integrity").unwrap();

        for index in 0..signed.signature.len() {
            let mut forged = signed.clone();
            forged.signature = flip_char(&signed.signature, index);
            assert!(!auth.verify_message(&forged).unwrap(), "position {index}");
        }
    }

    #[test]
    fn test_payload_edits_are_detected() {
        let auth = MessageAuthenticator::with_secret_key("tamper-key").unwrap();
        let signed = auth.sign_message("pay 10").unwrap();

        let mut forged = signed.clone();
        forged.payload = signed.payload.replace("pay 10", "pay 99");
        assert!(!auth.verify_message(&forged).unwrap());

        let mut forged = signed.clone();
        forged.signature = signed.signature.to_uppercase();
        assert!(!auth.verify_message(&forged).unwrap());

        let mut forged = signed;
        forged.signature.push('0');
        assert!(!auth.verify_message(&forged).unwrap());
    }

    #[test]
    fn test_ciphertext_bit_flips_never_yield_plaintext() {
        let cipher = PayloadCipher::new();
        let encrypted = cipher.encrypt_payload("secret instructions", "pw").unwrap();
        let ciphertext = STANDARD.decode(&encrypted.encrypted_payload).unwrap();

        for byte in [0, ciphertext.len() / 2, ciphertext.len() - 1] {
            let mut bytes = ciphertext.clone();
            bytes[byte] ^= 0x80;
            let mut tampered = encrypted.clone();
            tampered.encrypted_payload = STANDARD.encode(&bytes);
            assert_eq!(
                cipher.decrypt_payload(&tampered, "pw"),
                Err(DecryptionError::payload())
            );
        }

        let mut tag = STANDARD.decode(&encrypted.auth_tag).unwrap();
        tag[0] ^= 0x01;
        let mut tampered = encrypted;
        tampered.auth_tag = STANDARD.encode(tag);
        assert!(cipher.decrypt_payload(&tampered, "pw").is_err());
    }

    #[test]
    fn test_payload_errors_are_indistinguishable() {
        let cipher = PayloadCipher::new();
        let encrypted = cipher.encrypt_payload("x", "pw").unwrap();

        let mut bad_iv = encrypted.clone();
        bad_iv.iv = STANDARD.encode([0u8; 5]);
        let mut bad_b64 = encrypted.clone();
        bad_b64.salt = "%%%".to_string();
        let mut bad_version = encrypted.clone();
        bad_version.version = 200;

        let messages: Vec<String> = [
            cipher.decrypt_payload(&encrypted, "wrong"),
            cipher.decrypt_payload(&bad_iv, "pw"),
            cipher.decrypt_payload(&bad_b64, "pw"),
            cipher.decrypt_payload(&bad_version, "pw"),
            cipher.decrypt_payload_str("{}", "pw"),
        ]
        .into_iter()
        .map(|r| r.unwrap_err().to_string())
        .collect();

        assert!(messages.iter().all(|m| m == "Failed to decrypt payload"));
    }

    #[test]
    fn test_vault_truncation_and_extension() {
        let vault = SecretVault::new();
        let stored = vault.encrypt_token("api-token", "pw").unwrap();

        let truncated = &stored[..stored.len() - 2];
        let extended = format!("{stored}00");
        for input in [truncated, extended.as_str()] {
            assert_eq!(
                vault.decrypt_token(input, "pw"),
                Err(DecryptionError::token())
            );
        }

        let mut bytes = hex::decode(&stored).unwrap();
        bytes[20] ^= 0x01; // inside the IV
        assert_eq!(
            vault.decrypt_token(&hex::encode(bytes), "pw"),
            Err(DecryptionError::token())
        );
    }
}
