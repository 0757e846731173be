//! # Secret Envelope
//!
//! Byte layout, fixed offsets:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 16 | PBKDF2 salt |
//! | 16 | 12 | GCM nonce |
//! | 28 | 16 | GCM tag |
//! | 44 | N | ciphertext |
//!
//! V1 envelopes are bare hex. Later suites are written as `v<N>$<hex>`; the
//! prefix is optional on input and `v1$` reads as V1.

use shared_crypto::symmetric::fixed;
use shared_crypto::{CipherSuite, Sealed, IV_SIZE, SALT_SIZE, TAG_SIZE};

/// Smallest valid envelope: salt, nonce and tag around an empty ciphertext.
pub const MIN_ENVELOPE_LEN: usize = SALT_SIZE + IV_SIZE + TAG_SIZE;

const IV_OFFSET: usize = SALT_SIZE;
const TAG_OFFSET: usize = IV_OFFSET + IV_SIZE;

/// Why a stored secret could not be decrypted.
///
/// Never surfaced to callers; used for logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultFailure {
    /// Not a hex string, or a malformed version prefix.
    Encoding,
    /// Fewer than [`MIN_ENVELOPE_LEN`] bytes.
    TooShort,
    /// The prefix names an unknown cipher suite.
    UnsupportedVersion,
    /// Tag verification failed (wrong password or tampering).
    Authentication,
    /// The plaintext is not UTF-8.
    Utf8,
}

impl VaultFailure {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encoding => "invalid_encoding",
            Self::TooShort => "envelope_too_short",
            Self::UnsupportedVersion => "unsupported_version",
            Self::Authentication => "authentication_failed",
            Self::Utf8 => "invalid_utf8",
        }
    }
}

/// A decoded at-rest envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEnvelope {
    sealed: Sealed,
}

impl SecretEnvelope {
    /// Parse a stored hex string.
    ///
    /// # Errors
    /// - `VaultFailure::Encoding` for bad hex or a malformed prefix
    /// - `VaultFailure::UnsupportedVersion` for an unknown `v<N>$` prefix
    /// - `VaultFailure::TooShort` if the payload is under 44 bytes
    pub fn from_hex(encoded: &str) -> Result<Self, VaultFailure> {
        let (suite, body) = split_version(encoded)?;
        let bytes = hex::decode(body).map_err(|_| VaultFailure::Encoding)?;

        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(VaultFailure::TooShort);
        }

        let salt = fixed::<SALT_SIZE>("salt", &bytes[..IV_OFFSET])
            .map_err(|_| VaultFailure::TooShort)?;
        let iv = fixed::<IV_SIZE>("iv", &bytes[IV_OFFSET..TAG_OFFSET])
            .map_err(|_| VaultFailure::TooShort)?;
        let tag = fixed::<TAG_SIZE>("authTag", &bytes[TAG_OFFSET..MIN_ENVELOPE_LEN])
            .map_err(|_| VaultFailure::TooShort)?;

        Ok(Self {
            sealed: Sealed {
                suite,
                salt,
                iv,
                tag,
                ciphertext: bytes[MIN_ENVELOPE_LEN..].to_vec(),
            },
        })
    }

    /// Lowercase hex, prefixed with `v<N>$` for suites after V1.
    pub fn to_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(MIN_ENVELOPE_LEN + self.sealed.ciphertext.len());
        bytes.extend_from_slice(&self.sealed.salt);
        bytes.extend_from_slice(&self.sealed.iv);
        bytes.extend_from_slice(&self.sealed.tag);
        bytes.extend_from_slice(&self.sealed.ciphertext);

        match self.sealed.suite {
            CipherSuite::V1 => hex::encode(bytes),
        }
    }

    /// The sealed parts.
    pub fn sealed(&self) -> &Sealed {
        &self.sealed
    }

    /// Take the sealed parts.
    pub fn into_sealed(self) -> Sealed {
        self.sealed
    }
}

impl From<Sealed> for SecretEnvelope {
    fn from(sealed: Sealed) -> Self {
        Self { sealed }
    }
}

fn split_version(encoded: &str) -> Result<(CipherSuite, &str), VaultFailure> {
    let Some(rest) = encoded.strip_prefix('v') else {
        return Ok((CipherSuite::V1, encoded));
    };
    let (version, body) = rest.split_once('$').ok_or(VaultFailure::Encoding)?;
    let version: u8 = version.parse().map_err(|_| VaultFailure::Encoding)?;
    let suite = CipherSuite::from_version(version).map_err(|_| VaultFailure::UnsupportedVersion)?;
    Ok((suite, body))
}
