use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use models::address::{self, AddressChanges};

use super::domain::{AddressFilter, CreateAddress, UpdateAddress};
use super::repository::AddressRepository;
use crate::domain::MutationResult;
use crate::errors::ServiceError;
use crate::ownership::authorize_owner;

pub struct AddressesService {
    repo: Arc<dyn AddressRepository>,
}

impl AddressesService {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn create(&self, input: CreateAddress, user_id: Uuid) -> Result<address::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.insert(user_id, input.into()).await?;
        info!(address_id = %created.id, "address_created");
        Ok(created)
    }

    /// Addresses owned by `user_id` that match every field set in `filter`.
    pub async fn find_all(&self, user_id: Uuid, filter: AddressFilter) -> Result<Vec<address::Model>, ServiceError> {
        self.repo.find_owned(user_id, &filter).await
    }

    #[instrument(skip(self, input), fields(address_id = %id, user_id = %user_id))]
    pub async fn update(&self, id: Uuid, user_id: Uuid, input: UpdateAddress) -> Result<MutationResult, ServiceError> {
        input.validate()?;
        let changes: AddressChanges = input.into();
        if changes.is_empty() {
            return Err(ServiceError::Validation("no fields to update".into()));
        }
        self.authorize(id, user_id).await?;
        let affected = self.repo.update_owned(id, user_id, changes).await?;
        info!(affected, "address_updated");
        Ok(affected.into())
    }

    #[instrument(skip(self), fields(address_id = %id, user_id = %user_id))]
    pub async fn remove(&self, id: Uuid, user_id: Uuid) -> Result<MutationResult, ServiceError> {
        self.authorize(id, user_id).await?;
        let affected = self.repo.delete_owned(id, user_id).await?;
        info!(affected, "address_removed");
        Ok(affected.into())
    }

    async fn authorize(&self, id: Uuid, user_id: Uuid) -> Result<address::Model, ServiceError> {
        authorize_owner(self.repo.find_by_id(id), user_id, |a: &address::Model| a.user_id, "address", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialHasher;
    use crate::storage::MemoryStore;
    use crate::users::{domain::CreateUser, UsersService};

    struct Fixture {
        users: UsersService,
        addresses: AddressesService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        Fixture {
            users: UsersService::new(store.clone(), CredentialHasher::fast()),
            addresses: AddressesService::new(store),
        }
    }

    async fn user(f: &Fixture, email: &str) -> Uuid {
        f.users
            .create(CreateUser { email: email.into(), password: "Secret123".into() })
            .await
            .unwrap()
            .id
    }

    fn input(alias: &str, city: &str) -> CreateAddress {
        CreateAddress {
            alias: alias.into(),
            address: "Rua Direita".into(),
            number: Some(7),
            cep: "40000-000".into(),
            city: city.into(),
            state: "BA".into(),
            country: "BR".into(),
        }
    }

    #[tokio::test]
    async fn other_users_cannot_touch_an_address() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let b = user(&f, "b@example.com").await;
        let addr = f.addresses.create(input("home", "Salvador"), a).await.unwrap();

        let err = f
            .addresses
            .update(addr.id, b, UpdateAddress { alias: Some("stolen".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        let err = f.addresses.remove(addr.id, b).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let still = f.addresses.find_all(a, AddressFilter::default()).await.unwrap();
        assert_eq!(still, vec![addr]);
    }

    #[tokio::test]
    async fn missing_address_is_not_found() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let patch = UpdateAddress { alias: Some("x".into()), ..Default::default() };
        let err = f.addresses.update(Uuid::new_v4(), a, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = f.addresses.remove(Uuid::new_v4(), a).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let addr = f.addresses.create(input("home", "Salvador"), a).await.unwrap();
        let err = f.addresses.update(addr.id, a, UpdateAddress::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let unchanged = f.addresses.find_all(a, AddressFilter::default()).await.unwrap();
        assert_eq!(unchanged, vec![addr]);
    }

    #[tokio::test]
    async fn owner_mutations_affect_one_row() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let addr = f.addresses.create(input("home", "Salvador"), a).await.unwrap();

        let res = f
            .addresses
            .update(addr.id, a, UpdateAddress { city: Some("Ilheus".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(res.affected, 1);
        let after = f.addresses.find_all(a, AddressFilter::default()).await.unwrap();
        assert_eq!(after[0].city, "Ilheus");
        assert_eq!(after[0].alias, "home");

        assert_eq!(f.addresses.remove(addr.id, a).await.unwrap().affected, 1);
        assert!(f.addresses.find_all(a, AddressFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_is_scoped_to_owner_and_filter() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let b = user(&f, "b@example.com").await;
        let x1 = f.addresses.create(input("home", "X"), a).await.unwrap();
        let x2 = f.addresses.create(input("work", "X"), a).await.unwrap();
        f.addresses.create(input("beach", "Y"), a).await.unwrap();
        f.addresses.create(input("home", "X"), b).await.unwrap();

        let in_x = f
            .addresses
            .find_all(a, AddressFilter { city: Some("X".into()), ..Default::default() })
            .await
            .unwrap();
        let ids: Vec<Uuid> = in_x.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![x1.id, x2.id]);
        assert!(in_x.iter().all(|m| m.user_id == a));

        assert_eq!(f.addresses.find_all(a, AddressFilter::default()).await.unwrap().len(), 3);
        assert_eq!(f.addresses.find_all(b, AddressFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_user_cascades_addresses() {
        let f = fixture();
        let a = user(&f, "a@example.com").await;
        let addr = f.addresses.create(input("home", "X"), a).await.unwrap();
        f.users.remove(a).await.unwrap();
        assert!(f.addresses.find_all(a, AddressFilter::default()).await.unwrap().is_empty());
        let err = f.addresses.remove(addr.id, a).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn address_for_unknown_user_is_rejected() {
        let f = fixture();
        let err = f.addresses.create(input("home", "X"), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
