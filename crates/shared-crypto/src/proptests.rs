//! Property-based tests for the primitives.
//!
//! PBKDF2 dominates the cost of every seal/open, so the AEAD properties run
//! with a small case count.

use proptest::prelude::*;

use crate::{constant_time_eq, hmac_sha256_hex, open, seal, CipherSuite};

proptest! {
    /// Equal inputs always compare equal, distinct inputs never do.
    #[test]
    fn constant_time_eq_matches_slice_eq(a: Vec<u8>, b: Vec<u8>) {
        prop_assert!(constant_time_eq(&a, &a));
        prop_assert_eq!(constant_time_eq(&a, &b), a == b);
    }

    /// Digests are always 64 lowercase hex characters.
    #[test]
    fn hmac_hex_shape(key in prop::collection::vec(any::<u8>(), 1..64), data: Vec<u8>) {
        let digest = hmac_sha256_hex(&key, &data).unwrap();
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Sealing followed by opening returns the original plaintext.
    #[test]
    fn seal_open_roundtrip(plaintext in prop::collection::vec(any::<u8>(), 0..512)) {
        let sealed = seal(CipherSuite::V1, b"property-secret", &plaintext).unwrap();
        prop_assert_eq!(open(b"property-secret", &sealed).unwrap(), plaintext);
    }

    /// Flipping any ciphertext bit is detected.
    #[test]
    fn any_bit_flip_detected(
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        index: prop::sample::Index,
        bit in 0u8..8,
    ) {
        let mut sealed = seal(CipherSuite::V1, b"property-secret", &plaintext).unwrap();
        let i = index.index(sealed.ciphertext.len());
        sealed.ciphertext[i] ^= 1 << bit;
        prop_assert!(open(b"property-secret", &sealed).is_err());
    }
}
