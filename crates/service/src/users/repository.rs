use async_trait::async_trait;
use uuid::Uuid;

use models::user::{self, UserChanges};

use super::domain::UserWithAddresses;
use crate::{errors::ServiceError, pagination::Pagination};

/// Persistence for user records. Implementations enforce email uniqueness and
/// remove owned addresses when a user is deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_with_addresses(&self, id: Uuid) -> Result<Option<UserWithAddresses>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn list(&self, page: Pagination) -> Result<Vec<user::Model>, ServiceError>;
    async fn insert(&self, email: &str, password_hash: Option<String>) -> Result<user::Model, ServiceError>;
    /// Returns the number of rows touched.
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<u64, ServiceError>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}
