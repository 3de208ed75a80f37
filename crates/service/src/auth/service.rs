use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use super::domain::{AuthToken, SignInInput};
use crate::credentials::CredentialHasher;
use crate::errors::ServiceError;
use crate::token::TokenIssuer;
use crate::users::UsersService;

/// Exchanges email/password for a signed bearer token.
pub struct AuthService {
    users: Arc<UsersService>,
    hasher: CredentialHasher,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<UsersService>, hasher: CredentialHasher, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, hasher, tokens }
    }

    /// Verify credentials and issue a token for the matching user.
    ///
    /// An unknown email is `NotFound`; a wrong password, or an account with no
    /// stored password, is `Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{domain::SignInInput, AuthService};
    /// use service::credentials::CredentialHasher;
    /// use service::storage::MemoryStore;
    /// use service::token::TokenIssuer;
    /// use service::users::{domain::CreateUser, UsersService};
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let users = Arc::new(UsersService::new(store, CredentialHasher::fast()));
    /// let tokens = Arc::new(TokenIssuer::new("secret", 3600));
    /// let auth = AuthService::new(users.clone(), CredentialHasher::fast(), tokens.clone());
    ///
    /// let user = tokio_test::block_on(users.create(CreateUser { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// let issued = tokio_test::block_on(auth.sign_in_with_credentials(SignInInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(issued.expires_in, 3600);
    /// assert_eq!(tokens.decode(&issued.token).unwrap().sub, user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn sign_in_with_credentials(&self, input: SignInInput) -> Result<AuthToken, ServiceError> {
        input.validate()?;
        let user = self.users.find_by_email(&input.email).await?;
        let verified = match user.password.as_deref() {
            Some(stored) => self.hasher.spawn_verify(&input.password, stored).await?,
            None => false,
        };
        if !verified {
            warn!(user_id = %user.id, "sign_in_rejected");
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        }
        let token = self.tokens.issue(user.id, &user.email)?;
        info!(user_id = %user.id, "signed_in");
        Ok(AuthToken { token, expires_in: self.tokens.expires_in() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::token::TokenError;
    use crate::users::domain::CreateUser;
    use crate::users::repository::UserRepository;

    struct Fixture {
        store: Arc<MemoryStore>,
        users: Arc<UsersService>,
        tokens: Arc<TokenIssuer>,
        auth: AuthService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        let users = Arc::new(UsersService::new(store.clone(), CredentialHasher::fast()));
        let tokens = Arc::new(TokenIssuer::new("test-secret", 900));
        let auth = AuthService::new(users.clone(), CredentialHasher::fast(), tokens.clone());
        Fixture { store, users, tokens, auth }
    }

    fn sign_in(email: &str, password: &str) -> SignInInput {
        SignInInput { email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn correct_credentials_yield_token_for_user() {
        let f = fixture();
        let u = f.users.create(CreateUser { email: "a@example.com".into(), password: "Secret123".into() }).await.unwrap();
        let issued = f.auth.sign_in_with_credentials(sign_in("a@example.com", "Secret123")).await.unwrap();
        assert_eq!(issued.expires_in, 900);
        let claims = f.tokens.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.email, "a@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let f = fixture();
        f.users.create(CreateUser { email: "a@example.com".into(), password: "Secret123".into() }).await.unwrap();
        let err = f.auth.sign_in_with_credentials(sign_in("a@example.com", "Secret999")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let f = fixture();
        let err = f.auth.sign_in_with_credentials(sign_in("ghost@example.com", "Secret123")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn account_without_password_cannot_sign_in() {
        let f = fixture();
        f.store.insert("ext@example.com", None).await.unwrap();
        let err = f.auth.sign_in_with_credentials(sign_in("ext@example.com", "anything1")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let f = fixture();
        let u = f.users.create(CreateUser { email: "a@example.com".into(), password: "Secret123".into() }).await.unwrap();
        let long_ago = chrono::Utc::now().timestamp() - 10_000;
        let token = f.tokens.issue_at(u.id, &u.email, long_ago).unwrap();
        let err: ServiceError = f.tokens.decode(&token).unwrap_err().into();
        assert!(matches!(err, ServiceError::InvalidToken(TokenError::Expired)));
    }
}
