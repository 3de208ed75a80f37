//! Signed bearer tokens (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity facts embedded in a token. Rebuilt from the token on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token rejected: {0}")]
    Invalid(String),
    #[error("token encoding failed: {0}")]
    Encode(String),
}

/// Issues and verifies tokens with a server-held secret and a fixed lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expires_in: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expires_in_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in: expires_in_secs,
        }
    }

    /// Configured lifetime in seconds.
    pub fn expires_in(&self) -> u64 { self.expires_in }

    pub fn issue(&self, subject: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(subject, email, Utc::now().timestamp())
    }

    /// Issue with an explicit issued-at (unix seconds).
    pub fn issue_at(&self, subject: Uuid, email: &str, issued_at: i64) -> Result<String, TokenError> {
        let claims = AuthClaims {
            sub: subject,
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(i64::try_from(self.expires_in).unwrap_or(i64::MAX)),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<AuthClaims, TokenError> {
        decode::<AuthClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_same_subject() {
        let issuer = TokenIssuer::new("secret", 3600);
        let id = Uuid::new_v4();
        let token = issuer.issue(id, "a@example.com").unwrap();
        let claims = issuer.decode(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn oversized_lifetime_saturates_instead_of_wrapping() {
        let issuer = TokenIssuer::new("secret", u64::MAX);
        let token = issuer.issue(Uuid::new_v4(), "a@example.com").unwrap();
        let claims = issuer.decode(&token).unwrap();
        assert_eq!(claims.exp, i64::MAX);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new("secret", 60);
        let issued_at = Utc::now().timestamp() - 61 - 5;
        let token = issuer.issue_at(Uuid::new_v4(), "a@example.com", issued_at).unwrap();
        assert_eq!(issuer.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let ours = TokenIssuer::new("secret", 3600);
        let theirs = TokenIssuer::new("not-the-secret", 3600);
        let token = theirs.issue(Uuid::new_v4(), "a@example.com").unwrap();
        assert!(matches!(ours.decode(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let issuer = TokenIssuer::new("secret", 3600);
        let token = issuer.issue(Uuid::new_v4(), "a@example.com").unwrap();
        let other = issuer.issue(Uuid::new_v4(), "b@example.com").unwrap();
        // splice the payload of one token onto the signature of another
        let a: Vec<&str> = token.split('.').collect();
        let b: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", a[0], b[1], a[2]);
        assert!(matches!(issuer.decode(&forged), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = TokenIssuer::new("secret", 3600);
        assert!(matches!(issuer.decode("not.a.jwt"), Err(TokenError::Invalid(_))));
        assert!(matches!(issuer.decode(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn fresh_tokens_differ_across_time() {
        let issuer = TokenIssuer::new("secret", 3600);
        let id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let first = issuer.issue_at(id, "a@example.com", now).unwrap();
        let second = issuer.issue_at(id, "a@example.com", now + 1).unwrap();
        assert_ne!(first, second);
    }
}
