//! Field-level encryption for author contact data.
//!
//! Contact fields (name, email, phone) are stored as AES-256-CBC tokens of
//! the form `hex(iv) ':' hex(ciphertext)`, with a fresh random IV per call,
//! so a token is self-contained given the process-wide key.
//!
//! Policy notes:
//! - The empty string passes through unchanged in both directions; every
//!   other input goes through the cipher.
//! - `decrypt` is strict: any malformed token yields a typed
//!   [`PlazaError::Decryption`] error. Display paths that must never fail
//!   use [`FieldCodec::decrypt_or_unavailable`] instead.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};

use crate::{PlazaError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// IV length in bytes (AES block size).
pub const IV_LEN: usize = 16;

/// Placeholder shown when a stored token cannot be decrypted.
pub const UNAVAILABLE: &str = "(unavailable)";

/// Symmetric codec for PII fields.
///
/// Constructed once at startup from the configured key and shared across
/// requests; encryption is a pure function of (text, key) plus the random
/// IV drawn on each encrypt call.
#[derive(Clone)]
pub struct FieldCodec {
    key: [u8; KEY_LEN],
}

impl FieldCodec {
    /// Create a codec from a raw 32-byte key.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Create a codec from a hex-encoded key (64 hex characters).
    ///
    /// A malformed key is a configuration error; callers treat it as fatal
    /// at startup.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let bytes = hex::decode(hex_key)
            .map_err(|_| PlazaError::Config("encryption key is not valid hex".to_string()))?;
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            PlazaError::Config(format!(
                "encryption key must be {KEY_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self::new(key))
    }

    /// Encrypt a plaintext into a `hex(iv):hex(ciphertext)` token.
    ///
    /// The empty string is returned unchanged.
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        format!("{}:{}", hex::encode(iv), hex::encode(ciphertext))
    }

    /// Decrypt a token produced by [`FieldCodec::encrypt`].
    ///
    /// The empty string is returned unchanged; anything else that is not a
    /// well-formed token fails with a typed error.
    pub fn decrypt(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Ok(String::new());
        }

        let (iv_hex, ct_hex) = token
            .split_once(':')
            .ok_or_else(|| PlazaError::Decryption("token has no delimiter".to_string()))?;

        let iv_bytes = hex::decode(iv_hex)
            .map_err(|_| PlazaError::Decryption("IV is not valid hex".to_string()))?;
        let iv: [u8; IV_LEN] = iv_bytes.try_into().map_err(|v: Vec<u8>| {
            PlazaError::Decryption(format!("IV must be {IV_LEN} bytes, got {}", v.len()))
        })?;

        let ciphertext = hex::decode(ct_hex)
            .map_err(|_| PlazaError::Decryption("ciphertext is not valid hex".to_string()))?;

        let plaintext = Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| PlazaError::Decryption("ciphertext is corrupt".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| PlazaError::Decryption("plaintext is not valid UTF-8".to_string()))
    }

    /// Decrypt for display, degrading to a placeholder on failure.
    ///
    /// Used on read paths where a corrupt row must not take down the
    /// request; the failure is logged with the reason.
    pub fn decrypt_or_unavailable(&self, token: &str) -> String {
        match self.decrypt(token) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!("failed to decrypt stored field: {}", e);
                UNAVAILABLE.to_string()
            }
        }
    }
}

impl std::fmt::Debug for FieldCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("FieldCodec").finish()
    }
}
