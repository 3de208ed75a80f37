use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::address::{self, AddressChanges, NewAddress};

use crate::addresses::domain::AddressFilter;
use crate::addresses::repository::AddressRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

fn owned_condition(user_id: Uuid, f: &AddressFilter) -> Condition {
    let mut cond = Condition::all().add(address::Column::UserId.eq(user_id));
    if let Some(id) = f.id { cond = cond.add(address::Column::Id.eq(id)); }
    if let Some(v) = &f.alias { cond = cond.add(address::Column::Alias.eq(v.clone())); }
    if let Some(v) = &f.cep { cond = cond.add(address::Column::Cep.eq(v.clone())); }
    if let Some(v) = &f.city { cond = cond.add(address::Column::City.eq(v.clone())); }
    if let Some(v) = &f.state { cond = cond.add(address::Column::State.eq(v.clone())); }
    if let Some(v) = &f.country { cond = cond.add(address::Column::Country.eq(v.clone())); }
    cond
}

#[async_trait::async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn insert(&self, user_id: Uuid, new: NewAddress) -> Result<address::Model, ServiceError> {
        Ok(address::create(&self.db, user_id, new).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<address::Model>, ServiceError> {
        Ok(address::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_owned(&self, user_id: Uuid, filter: &AddressFilter) -> Result<Vec<address::Model>, ServiceError> {
        let rows = address::Entity::find()
            .filter(owned_condition(user_id, filter))
            .order_by_asc(address::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: AddressChanges) -> Result<u64, ServiceError> {
        Ok(address::update_owned(&self.db, id, user_id, changes).await?)
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, ServiceError> {
        Ok(address::delete_owned(&self.db, id, user_id).await?)
    }
}
