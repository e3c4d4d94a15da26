//! JWT issue and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Discriminator stored in the `type` claim of tokens minted at login.
pub const ACCESS_TOKEN_TYPE: &str = "accessToken";

/// Claim set carried by every token this service issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated principal. Optional on decode so a
    /// token without a subject is rejected by the caller, not by serde.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Token kind discriminator (e.g. [`ACCESS_TOKEN_TYPE`]).
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Why a token failed to decode. Callers collapse all three to a single
/// 401 outcome; the distinction exists for logs.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token signature invalid")]
    SignatureInvalid,
    #[error("token malformed: {0}")]
    Malformed(jsonwebtoken::errors::Error),
}

/// Issues and validates signed, time-limited bearer tokens.
///
/// Built once at startup from explicit config (secret, algorithm, TTL);
/// tests construct their own instances with distinct keys.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    access_ttl_minutes: u64,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm, access_ttl_minutes: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            access_ttl_minutes,
        }
    }

    /// Sign a token for `sub` expiring `ttl_minutes` from now.
    pub fn issue(
        &self,
        sub: &str,
        token_type: &str,
        ttl_minutes: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = (Utc::now() + Duration::minutes(ttl_minutes as i64)).timestamp();
        let claims = Claims {
            sub: Some(sub.to_string()),
            exp,
            token_type: token_type.to_string(),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding)
    }

    /// Sign an access token with the configured lifetime.
    pub fn issue_access(&self, sub: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(sub, ACCESS_TOKEN_TYPE, self.access_ttl_minutes)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Expiry is checked with zero leeway: a token is invalid the moment
    /// `now` passes `exp`.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed(e),
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, Algorithm::HS256, 30)
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let svc = service("test-secret");
        let token = svc.issue_access("alice").unwrap();
        let claims = svc.decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_is_signature_invalid() {
        let token = service("secret-a").issue_access("alice").unwrap();
        let err = service("secret-b").decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::SignatureInvalid));
    }

    #[test]
    fn zero_ttl_expires_after_any_delay() {
        let svc = service("test-secret");
        let token = svc.issue("alice", ACCESS_TOKEN_TYPE, 0).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let err = svc.decode(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let svc = service("test-secret");
        assert!(matches!(
            svc.decode("not-a-jwt").unwrap_err(),
            TokenError::Malformed(_)
        ));
        assert!(matches!(
            svc.decode("").unwrap_err(),
            TokenError::Malformed(_)
        ));
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let svc = service("test-secret");
        let token = svc.issue_access("alice").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = "eyJzdWIiOiJtYWxsb3J5In0";
        parts[1] = forged;
        assert!(svc.decode(&parts.join(".")).is_err());
    }
}
