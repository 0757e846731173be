//! # Symmetric Encryption
//!
//! Password-based AES-256-GCM with detached tags.
//!
//! ## Security Properties
//!
//! - **Fresh salt and nonce** per call, so the same password never reuses a
//!   (key, nonce) pair.
//! - **Authenticated**: any change to ciphertext, tag, salt or nonce makes
//!   [`open`] fail; no partial plaintext is ever returned.
//! - **Versioned**: parameters are bound to a [`CipherSuite`] so iteration
//!   counts or algorithms can be upgraded without breaking stored data.

use crate::kdf::derive_key;
use crate::CryptoError;
use aes_gcm::{
    aead::{generic_array::GenericArray, AeadInPlace, KeyInit},
    Aes256Gcm,
};
use rand::RngCore;

/// GCM nonce size in bytes.
pub const IV_SIZE: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// PBKDF2 salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count for [`CipherSuite::V1`].
pub const PBKDF2_ITERATIONS_V1: u32 = 100_000;

/// Cipher parameter sets, tagged on every envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CipherSuite {
    /// AES-256-GCM, PBKDF2-HMAC-SHA256 with 100 000 iterations,
    /// 16-byte salt, 12-byte IV, 16-byte tag.
    #[default]
    V1,
}

impl CipherSuite {
    /// The suite new envelopes are written with.
    pub const CURRENT: CipherSuite = CipherSuite::V1;

    /// Numeric tag stored in envelopes.
    pub fn version(&self) -> u8 {
        match self {
            Self::V1 => 1,
        }
    }

    /// Looks up a suite by its envelope tag.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedSuite` for unknown tags.
    pub fn from_version(version: u8) -> Result<Self, CryptoError> {
        match version {
            1 => Ok(Self::V1),
            other => Err(CryptoError::UnsupportedSuite(other)),
        }
    }

    /// PBKDF2 iteration count.
    pub fn iterations(&self) -> u32 {
        match self {
            Self::V1 => PBKDF2_ITERATIONS_V1,
        }
    }
}

/// Output of [`seal`]: everything needed to decrypt except the password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sealed {
    /// Suite the envelope was written with
    pub suite: CipherSuite,
    /// PBKDF2 salt
    pub salt: [u8; SALT_SIZE],
    /// GCM nonce
    pub iv: [u8; IV_SIZE],
    /// GCM authentication tag
    pub tag: [u8; TAG_SIZE],
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
}

/// Generate a random PBKDF2 salt.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut bytes = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Generate a random GCM nonce.
pub fn generate_iv() -> [u8; IV_SIZE] {
    let mut bytes = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Encrypt `plaintext` under a key derived from `password`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the cipher rejects the input.
pub fn seal(suite: CipherSuite, password: &[u8], plaintext: &[u8]) -> Result<Sealed, CryptoError> {
    let salt = generate_salt();
    let iv = generate_iv();
    let key = derive_key(password, &salt, suite.iterations());

    let cipher = Aes256Gcm::new_from_slice(key.as_ref()).map_err(|_| {
        CryptoError::InvalidKeyLength {
            expected: crate::kdf::KEY_SIZE,
            actual: key.len(),
        }
    })?;

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&iv), b"", &mut buffer)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        suite,
        salt,
        iv,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Decrypt and authenticate a [`Sealed`] envelope.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` for a wrong password or any
/// tampering.
pub fn open(password: &[u8], sealed: &Sealed) -> Result<Vec<u8>, CryptoError> {
    let key = derive_key(password, &sealed.salt, sealed.suite.iterations());

    let cipher = Aes256Gcm::new_from_slice(key.as_ref()).map_err(|_| {
        CryptoError::InvalidKeyLength {
            expected: crate::kdf::KEY_SIZE,
            actual: key.len(),
        }
    })?;

    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&sealed.iv),
            b"",
            &mut buffer,
            GenericArray::from_slice(&sealed.tag),
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(buffer)
}

/// Copies `bytes` into a fixed-size array, naming the field on mismatch.
///
/// # Errors
///
/// Returns `CryptoError::InvalidFieldLength` if the length differs from `N`.
pub fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], CryptoError> {
    bytes.try_into().map_err(|_| CryptoError::InvalidFieldLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
