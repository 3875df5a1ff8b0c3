//! 密码哈希
//!
//! Argon2 哈希与验证，登录凭证永不明文存储。

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password using argon2 (random salt per hash)
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored argon2 hash
///
/// Errors only when the stored hash itself cannot be parsed; a wrong
/// password yields `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_differs_from_plaintext() {
        let hash = hash_password("hunter2").expect("Failed to hash password");
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("hunter2").expect("Failed to hash password");
        assert!(verify_password("hunter2", &hash).expect("Verify failed"));
        assert!(!verify_password("wrong", &hash).expect("Verify failed"));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let h1 = hash_password("hunter2").expect("Failed to hash password");
        let h2 = hash_password("hunter2").expect("Failed to hash password");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("hunter2", "not-a-hash").is_err());
    }
}
