use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{address, user::{self, UserChanges}};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::users::domain::UserWithAddresses;
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_with_addresses(&self, id: Uuid) -> Result<Option<UserWithAddresses>, ServiceError> {
        let rows = user::Entity::find_by_id(id)
            .find_with_related(address::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .next()
            .map(|(user, addresses)| UserWithAddresses { user, addresses }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<user::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        let users = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await?;
        Ok(users)
    }

    async fn insert(&self, email: &str, password_hash: Option<String>) -> Result<user::Model, ServiceError> {
        Ok(user::create(&self.db, email, password_hash).await?)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<u64, ServiceError> {
        Ok(user::update(&self.db, id, changes).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(user::hard_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::repo::seaorm::SeaOrmAddressRepository;
    use crate::addresses::repository::AddressRepository;
    use crate::test_support::get_db;
    use models::address::NewAddress;

    fn new_address(city: &str) -> NewAddress {
        NewAddress {
            alias: "home".into(),
            address: "Rua das Flores".into(),
            number: Some(10),
            cep: "01000-000".into(),
            city: city.into(),
            state: "SP".into(),
            country: "BR".into(),
        }
    }

    #[tokio::test]
    async fn user_crud_and_cascade() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let users = SeaOrmUserRepository { db: db.clone() };
        let addresses = SeaOrmAddressRepository { db };

        let email = format!("repo_{}@example.com", Uuid::new_v4());
        let u = users.insert(&email, Some("hash".into())).await?;
        assert_eq!(u.email, email);

        let dup = users.insert(&email, None).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let found = users.find_by_email(&email).await?.unwrap();
        assert_eq!(found.id, u.id);

        let a = addresses.insert(u.id, new_address("Campinas")).await?;
        let with = users.find_with_addresses(u.id).await?.unwrap();
        assert_eq!(with.addresses.len(), 1);
        assert_eq!(with.addresses[0].id, a.id);

        let touched = users.update(u.id, UserChanges { password_hash: Some("other".into()), ..Default::default() }).await?;
        assert_eq!(touched, 1);
        assert_eq!(users.find_by_email(&email).await?.unwrap().password.as_deref(), Some("other"));

        assert_eq!(users.delete(u.id).await?, 1);
        assert!(users.find_with_addresses(u.id).await?.is_none());
        assert!(addresses.find_by_id(a.id).await?.is_none());
        Ok(())
    }
}
