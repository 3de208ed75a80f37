use sea_orm::{entity::prelude::*, sea_query::Expr, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

/// Postal address owned by exactly one user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub alias: String,
    pub address: String,
    pub number: Option<i64>,
    /// Postal code.
    pub cep: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new address; the owner is passed separately.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAddress {
    pub alias: String,
    pub address: String,
    pub number: Option<i64>,
    pub cep: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressChanges {
    pub alias: Option<String>,
    pub address: Option<String>,
    pub number: Option<i64>,
    pub cep: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the provided fields onto an in-memory model.
    pub fn apply_to(&self, m: &mut Model) {
        if let Some(v) = &self.alias { m.alias = v.clone(); }
        if let Some(v) = &self.address { m.address = v.clone(); }
        if let Some(v) = self.number { m.number = Some(v); }
        if let Some(v) = &self.cep { m.cep = v.clone(); }
        if let Some(v) = &self.city { m.city = v.clone(); }
        if let Some(v) = &self.state { m.state = v.clone(); }
        if let Some(v) = &self.country { m.country = v.clone(); }
    }
}

pub async fn create(db: &DatabaseConnection, user_id: Uuid, new: NewAddress) -> Result<Model, ModelError> {
    if new.alias.trim().is_empty() { return Err(ModelError::Validation("alias required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        alias: Set(new.alias),
        address: Set(new.address),
        number: Set(new.number),
        cep: Set(new.cep),
        city: Set(new.city),
        state: Set(new.state),
        country: Set(new.country),
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Update scoped by both `id` and `user_id`; returns affected rows.
pub async fn update_owned(db: &DatabaseConnection, id: Uuid, user_id: Uuid, changes: AddressChanges) -> Result<u64, ModelError> {
    let mut query = Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())));
    if let Some(v) = changes.alias { query = query.col_expr(Column::Alias, Expr::value(v)); }
    if let Some(v) = changes.address { query = query.col_expr(Column::Address, Expr::value(v)); }
    if let Some(v) = changes.number { query = query.col_expr(Column::Number, Expr::value(v)); }
    if let Some(v) = changes.cep { query = query.col_expr(Column::Cep, Expr::value(v)); }
    if let Some(v) = changes.city { query = query.col_expr(Column::City, Expr::value(v)); }
    if let Some(v) = changes.state { query = query.col_expr(Column::State, Expr::value(v)); }
    if let Some(v) = changes.country { query = query.col_expr(Column::Country, Expr::value(v)); }
    let res = query
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Delete scoped by both `id` and `user_id`; returns affected rows.
pub async fn delete_owned(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
