use async_trait::async_trait;
use uuid::Uuid;

use models::address::{self, AddressChanges, NewAddress};

use super::domain::AddressFilter;
use crate::errors::ServiceError;

/// Persistence for addresses. Mutations take both the address id and the owner
/// id and only touch rows matching both.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn insert(&self, user_id: Uuid, new: NewAddress) -> Result<address::Model, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<address::Model>, ServiceError>;
    async fn find_owned(&self, user_id: Uuid, filter: &AddressFilter) -> Result<Vec<address::Model>, ServiceError>;
    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: AddressChanges) -> Result<u64, ServiceError>;
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, ServiceError>;
}
