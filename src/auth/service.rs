//! Credential service: password hashing and the login verification flow.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::debug;

use crate::db::{user_find_by_username, DbPool, UserRow};
use crate::error::{AppError, AppResult};

pub struct AuthService;

impl AuthService {
    /// Hash a plaintext password with a fresh random salt. The output is
    /// self-describing (algorithm, params, salt embedded), so two calls on
    /// the same input produce different strings.
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
            .to_string();
        Ok(hash)
    }

    /// Hash on a blocking worker. Argon2 is deliberately slow; running it
    /// inline would stall the async executor.
    pub async fn hash_password_blocking(password: String) -> AppResult<String> {
        tokio::task::spawn_blocking(move || Self::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
    }

    /// Constant-time verification. A hash string that does not parse as an
    /// argon2 hash (wrong algorithm family, corrupt value) verifies as
    /// `false` rather than erroring.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Look up `username` and check `password` against the stored hash.
    ///
    /// Unknown username and wrong password take the same error path
    /// ([`AppError::AuthFailed`]), so the response never reveals whether
    /// the account exists. Verification runs on a blocking worker.
    pub async fn verify_credentials(
        pool: &DbPool,
        username: &str,
        password: &str,
    ) -> AppResult<UserRow> {
        let Some(user) = user_find_by_username(pool, username).await? else {
            debug!(username, "login rejected: unknown username");
            return Err(AppError::AuthFailed);
        };

        let password = password.to_string();
        let hash = user.password.clone();
        let ok = tokio::task::spawn_blocking(move || Self::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?;
        if !ok {
            debug!(username, "login rejected: password mismatch");
            return Err(AppError::AuthFailed);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = AuthService::hash_password("mypassword").unwrap();
        assert!(AuthService::verify_password("mypassword", &hash));
        assert!(!AuthService::verify_password("wrong", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = AuthService::hash_password("mypassword").unwrap();
        let b = AuthService::hash_password("mypassword").unwrap();
        assert_ne!(a, b);
        assert!(AuthService::verify_password("mypassword", &a));
        assert!(AuthService::verify_password("mypassword", &b));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!AuthService::verify_password("mypassword", "not-a-hash"));
        assert!(!AuthService::verify_password("mypassword", ""));
        // bcrypt-format string from another hasher family
        assert!(!AuthService::verify_password(
            "mypassword",
            "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW"
        ));
    }

    #[tokio::test]
    async fn blocking_hash_matches_sync_verify() {
        let hash = AuthService::hash_password_blocking("pw123".to_string())
            .await
            .unwrap();
        assert!(AuthService::verify_password("pw123", &hash));
    }
}
