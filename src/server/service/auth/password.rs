//! Werkzeug-compatible PBKDF2 password hashes.
//!
//! Format: `pbkdf2:sha256:{iterations}${salt}${hex digest}`.

use pbkdf2::pbkdf2_hmac;
use rand::{distr::Alphanumeric, Rng};
use sha2::Sha256;

use crate::server::error::Error;

pub const DEFAULT_ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Hashes `password` with a fresh 16 character alphanumeric salt
pub fn hash_password(password: &str) -> String {
    let salt: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect();

    hash_with_salt(password, &salt, DEFAULT_ITERATIONS)
}

pub fn hash_with_salt(password: &str, salt: &str, iterations: u32) -> String {
    format!(
        "pbkdf2:sha256:{}${}${}",
        iterations,
        salt,
        hex::encode(derive(password, salt, iterations))
    )
}

/// Checks `password` against a stored hash; unknown formats never verify
pub fn verify_password(stored: &str, password: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(method), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let mut method_parts = method.split(':');
    let (Some("pbkdf2"), Some("sha256"), iterations, None) = (
        method_parts.next(),
        method_parts.next(),
        method_parts.next(),
        method_parts.next(),
    ) else {
        return false;
    };

    // werkzeug omits the iteration count when it used its own default
    let iterations = match iterations {
        Some(value) => match value.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return false,
        },
        None => DEFAULT_ITERATIONS,
    };

    let Ok(expected) = hex::decode(digest) else {
        return false;
    };

    constant_time_eq(&derive(password, salt, iterations), &expected)
}

/// [`hash_password`] on the blocking thread pool
pub async fn spawn_hash_password(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::InternalError(format!("Password hashing task failed: {}", e)))
}

/// [`verify_password`] on the blocking thread pool
pub async fn spawn_verify_password(stored: String, password: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || verify_password(&stored, &password))
        .await
        .map_err(|e| Error::InternalError(format!("Password check task failed: {}", e)))
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
