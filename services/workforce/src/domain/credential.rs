//! One-time credentials issued on approval and account creation.

use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use rand::RngExt;

pub const TEMPORARY_CREDENTIAL_LEN: usize = 12;

/// Uppercase alphanumeric.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_temporary_credential() -> String {
    let mut rng = rand::rng();
    (0..TEMPORARY_CREDENTIAL_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Argon2id PHC string.
pub fn hash_credential(credential: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(credential.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("hash credential: {e}"))
}
