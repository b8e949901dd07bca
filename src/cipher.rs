//! Reversible cipher for the password attribute.
//!
//! The attribute bag must never hold a plaintext password, but a downstream
//! consumer needs the original back, so the transform is a keyed AEAD rather
//! than a hash: XChaCha20-Poly1305 with a key derived once at construction.
//!
//! Security properties:
//! - Key material is established once and immutable thereafter; the cipher is
//!   safe for unsynchronized concurrent use (share it behind `Arc`).
//! - The derived key copy is zeroed immediately after cipher construction.
//! - Debug output never includes key material.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{AeadCore, XChaCha20Poly1305, XNonce};
use zeroize::Zeroize;

use crate::error::AuthError;

/// Domain separation string for deriving the symmetric key from the supplied
/// key material. Binds the derived key to this use and nothing else.
const KDF_CONTEXT: &str = "dbauth v1 secret attribute cipher key";

/// XChaCha20-Poly1305 nonce length prepended to every token.
const NONCE_LEN: usize = 24;

/// Keyed, reversible cipher used to obscure the password before it is stored
/// as a profile attribute.
///
/// Tokens are `base64(nonce || ciphertext || tag)`. Each `encrypt` call uses
/// a fresh random 24-byte nonce, so encrypting the same secret twice yields
/// different tokens; both decrypt to the original.
pub struct SecretCipher {
    cipher: XChaCha20Poly1305,
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SecretCipher {
    /// Build the cipher from 32 bytes of key material.
    ///
    /// The material is passed through BLAKE3 key derivation (domain-separated)
    /// before use, so it may come from any uniformly-kept process secret.
    pub fn new(key_material: &[u8; 32]) -> Self {
        let mut derived_key = blake3::derive_key(KDF_CONTEXT, key_material);
        let cipher = XChaCha20Poly1305::new((&derived_key).into());
        derived_key.zeroize();
        Self { cipher }
    }

    /// Encrypt a secret into a base64 token with a random nonce.
    pub fn encrypt(&self, secret: &str) -> Result<String, AuthError> {
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, secret.as_bytes())
            .map_err(|e| AuthError::Cipher(format!("Encrypt failed: {}", e)))?;
        let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        framed.extend_from_slice(nonce.as_slice());
        framed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(framed))
    }

    /// Decrypt a token produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails on malformed base64, a truncated frame, a wrong key, or a
    /// tampered ciphertext.
    pub fn decrypt(&self, token: &str) -> Result<String, AuthError> {
        let framed = BASE64
            .decode(token)
            .map_err(|e| AuthError::Cipher(format!("Invalid base64 token: {}", e)))?;
        if framed.len() < NONCE_LEN {
            return Err(AuthError::Cipher("Token too short".into()));
        }
        let (nonce, ciphertext) = framed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|e| AuthError::Cipher(format!("Decrypt failed: {}", e)))?;
        String::from_utf8(plaintext)
            .map_err(|_| AuthError::Cipher("Decrypted secret is not valid UTF-8".into()))
    }
}
