//! Card data encryption with AES-256-GCM.
//!
//! Format: `base64(nonce_12 || ciphertext || tag_16)`

use std::fmt::{Debug, Formatter, Result as FmtResult};

use aes_gcm::{
    Aes256Gcm, KeyInit, Nonce,
    aead::Aead,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroize;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption key is not valid base64")]
    KeyEncoding(#[source] base64::DecodeError),

    #[error("encryption key must be 32 bytes, got {0}")]
    KeyLength(usize),

    #[error("ciphertext is not valid base64")]
    CiphertextEncoding(#[source] base64::DecodeError),

    #[error("ciphertext too short")]
    CiphertextTooShort,

    #[error("encryption failed")]
    Encrypt,

    #[error("decryption failed")]
    Decrypt,
}

/// Symmetric cipher used to protect card data before it is sent to the
/// payment gateway.
#[derive(Clone)]
pub struct CardCipher {
    key: [u8; KEY_LEN],
}

impl Drop for CardCipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl Debug for CardCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CardCipher").finish_non_exhaustive()
    }
}

impl CardCipher {
    #[must_use]
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Build a cipher from a base64 encoded 32 byte key.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is not base64 or has the wrong length.
    pub fn from_base64(encoded: &str) -> Result<Self, CipherError> {
        let mut bytes = STANDARD
            .decode(encoded.trim())
            .map_err(CipherError::KeyEncoding)?;

        let result = <[u8; KEY_LEN]>::try_from(bytes.as_slice())
            .map(Self::new)
            .map_err(|_wrong_length| CipherError::KeyLength(bytes.len()));

        bytes.zeroize();

        result
    }

    fn aead(&self) -> Aes256Gcm {
        Aes256Gcm::new(&self.key.into())
    }

    /// Encrypt `plaintext` with a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Encrypt`] when the AEAD operation fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce = [0_u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .aead()
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_opaque| CipherError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(sealed))
    }

    /// Reverse [`CardCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns an error for malformed input or when authentication fails.
    pub fn decrypt(&self, sealed: &str) -> Result<String, CipherError> {
        let data = STANDARD
            .decode(sealed)
            .map_err(CipherError::CiphertextEncoding)?;

        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::CiphertextTooShort);
        }

        let (nonce, ciphertext) = data
            .split_at_checked(NONCE_LEN)
            .ok_or(CipherError::CiphertextTooShort)?;

        let plaintext = self
            .aead()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_opaque| CipherError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_not_utf8| CipherError::Decrypt)
    }
}
