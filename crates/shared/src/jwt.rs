//! Bearer token signing and verification for dashboard principals.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. The dashboard only needs to
//! verify them; signing exists for local tooling and tests.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::JwtConfig;

/// Errors from signing or verifying a token.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Claims could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Malformed token, bad signature or missing claims.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// Token is past its expiry.
    #[error("token has expired")]
    Expired,
}

/// Signs and verifies principal tokens with a shared secret.
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .field("keys", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Builds the service from the `jwt` configuration section.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        let ttl = i64::try_from(config.access_token_expiry_secs)
            .map_or(Duration::MAX, Duration::seconds);
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs a token for a principal, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Signing` if encoding fails.
    pub fn issue(
        &self,
        user_id: Uuid,
        role: &str,
        province: Option<Uuid>,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sign(&Claims::new(user_id, role, province, expires_at))
    }

    /// Signs arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Signing` if encoding fails.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Verifies a bearer token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` past expiry, `JwtError::Invalid` otherwise.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_secs: 900,
        })
    }

    #[test]
    fn test_token_carries_role_and_province() {
        let jwt = service("test-secret-key-for-testing");
        let user_id = Uuid::new_v4();
        let province = Uuid::new_v4();

        let token = jwt.issue(user_id, "ASM", Some(province)).unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, "ASM");
        assert_eq!(claims.province, Some(province));
    }

    #[test]
    fn test_token_without_province() {
        let jwt = service("test-secret-key-for-testing");
        let token = jwt.issue(Uuid::new_v4(), "Admin", None).unwrap();
        assert_eq!(jwt.verify(&token).unwrap().province, None);
    }

    #[test]
    fn test_expired_token() {
        let jwt = service("test-secret-key-for-testing");
        let stale = Claims::new(
            Uuid::new_v4(),
            "Admin",
            None,
            Utc::now() - Duration::minutes(10),
        );
        let token = jwt.sign(&stale).unwrap();
        assert!(matches!(jwt.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_garbage_and_foreign_tokens_are_invalid() {
        let jwt = service("test-secret-key-for-testing");
        assert!(matches!(jwt.verify("invalid.token.here"), Err(JwtError::Invalid(_))));

        let foreign = service("another-secret")
            .issue(Uuid::new_v4(), "Admin", None)
            .unwrap();
        assert!(matches!(jwt.verify(&foreign), Err(JwtError::Invalid(_))));
    }
}
