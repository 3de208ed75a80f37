use std::sync::Arc;

use service::{
    addresses::{repository::AddressRepository, AddressesService},
    auth::AuthService,
    credentials::CredentialHasher,
    token::TokenIssuer,
    users::{repository::UserRepository, UsersService},
};

/// Shared, immutable handler state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UsersService>,
    pub addresses: Arc<AddressesService>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenIssuer>,
}

impl ServerState {
    /// Wire the services over the given repositories.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        address_repo: Arc<dyn AddressRepository>,
        hasher: CredentialHasher,
        tokens: TokenIssuer,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let users = Arc::new(UsersService::new(user_repo, hasher.clone()));
        let auth = Arc::new(AuthService::new(users.clone(), hasher, tokens.clone()));
        let addresses = Arc::new(AddressesService::new(address_repo));
        Self { users, addresses, auth, tokens }
    }
}
