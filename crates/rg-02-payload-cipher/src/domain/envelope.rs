//! # Encrypted Message Codec
//!
//! Maps between the binary [`Sealed`] form and the base64 JSON
//! [`EncryptedMessage`] envelope.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared_crypto::symmetric::fixed;
use shared_crypto::{CipherSuite, Sealed, IV_SIZE, SALT_SIZE, TAG_SIZE};
use shared_types::{EncryptedMessage, Timestamp};

/// Why an envelope could not be decrypted.
///
/// Never surfaced to callers; used for logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeFailure {
    /// A field is not valid base64.
    Encoding,
    /// A fixed-size field decoded to the wrong length.
    FieldLength,
    /// The envelope names an unknown cipher suite.
    UnsupportedVersion,
    /// The timestamp is outside the replay window.
    Expired,
    /// Tag verification failed (wrong secret or tampering).
    Authentication,
    /// The plaintext is not UTF-8.
    Utf8,
    /// The wire JSON could not be parsed.
    Malformed,
}

impl EnvelopeFailure {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encoding => "invalid_encoding",
            Self::FieldLength => "invalid_field_length",
            Self::UnsupportedVersion => "unsupported_version",
            Self::Expired => "expired",
            Self::Authentication => "authentication_failed",
            Self::Utf8 => "invalid_utf8",
            Self::Malformed => "malformed_envelope",
        }
    }
}

/// Encode a sealed payload as a wire envelope stamped with `timestamp`.
pub fn encode_envelope(sealed: &Sealed, timestamp: Timestamp) -> EncryptedMessage {
    EncryptedMessage {
        encrypted_payload: STANDARD.encode(&sealed.ciphertext),
        iv: STANDARD.encode(sealed.iv),
        auth_tag: STANDARD.encode(sealed.tag),
        salt: STANDARD.encode(sealed.salt),
        timestamp,
        version: sealed.suite.version(),
    }
}

/// Decode and length-check a wire envelope.
pub fn decode_envelope(message: &EncryptedMessage) -> Result<Sealed, EnvelopeFailure> {
    let suite = CipherSuite::from_version(message.version)
        .map_err(|_| EnvelopeFailure::UnsupportedVersion)?;

    let ciphertext = decode(&message.encrypted_payload)?;
    let iv = fixed::<IV_SIZE>("iv", &decode(&message.iv)?)
        .map_err(|_| EnvelopeFailure::FieldLength)?;
    let tag = fixed::<TAG_SIZE>("authTag", &decode(&message.auth_tag)?)
        .map_err(|_| EnvelopeFailure::FieldLength)?;
    let salt = fixed::<SALT_SIZE>("salt", &decode(&message.salt)?)
        .map_err(|_| EnvelopeFailure::FieldLength)?;

    Ok(Sealed {
        suite,
        salt,
        iv,
        tag,
        ciphertext,
    })
}

fn decode(field: &str) -> Result<Vec<u8>, EnvelopeFailure> {
    STANDARD.decode(field).map_err(|_| EnvelopeFailure::Encoding)
}
