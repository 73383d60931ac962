//! RSA-SHA1 Request Signatures
//!
//! Verifies the `Signature` header of a skill request against the raw body
//! bytes exactly as they arrived on the wire.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;

/// Verify a raw PKCS#1 v1.5 signature over `payload` with a SHA-1 digest.
pub fn verify_signature(public_key: &RsaPublicKey, signature: &[u8], payload: &[u8]) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };

    VerifyingKey::<Sha1>::new(public_key.clone())
        .verify(payload, &signature)
        .is_ok()
}

/// Verify a base64-encoded signature header value.
///
/// Undecodable base64 is a failed verification, not a separate error.
pub fn verify_signature_b64(public_key: &RsaPublicKey, signature_b64: &str, payload: &[u8]) -> bool {
    match STANDARD.decode(signature_b64.trim()) {
        Ok(signature) => verify_signature(public_key, &signature, payload),
        Err(_) => false,
    }
}
