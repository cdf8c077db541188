//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings, so algorithm parameters and the salt
//! travel with the digest and verification is self-contained. The salt is
//! drawn from [`OsRng`] on every hash. Verification goes through the argon2
//! verifier, which compares digests in constant time.
//!
//! This lives in `habitly-core` (rather than next to the token code) so the
//! credential store can invoke it inside `create` and `update_password` --
//! hashing is an explicit step at those call sites, never an implicit
//! save-time trigger.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password does not match; `Err` means the stored
/// hash could not be parsed or verification itself failed.
pub fn verify_password(
    plaintext: &str,
    hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check a candidate password against the minimum length policy.
pub fn validate_password_strength(plaintext: &str, min_length: usize) -> Result<(), String> {
    if plaintext.len() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}
