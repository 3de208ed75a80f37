use sea_orm::{entity::prelude::*, sea_query::Expr, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::address;
use crate::errors::ModelError;

/// Registered account. `password` holds an argon2 PHC string and is never
/// serialized into responses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Address => Entity::has_many(address::Entity).into() }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef { Relation::Address.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a partial update may touch. `None` leaves the column unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}

pub async fn create(db: &DatabaseConnection, email: &str, password_hash: Option<String>) -> Result<Model, ModelError> {
    if email.trim().is_empty() { return Err(ModelError::Validation("email required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Apply `changes` to the user with `id`; returns the number of rows touched.
pub async fn update(db: &DatabaseConnection, id: Uuid, changes: UserChanges) -> Result<u64, ModelError> {
    let mut query = Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())));
    if let Some(email) = changes.email {
        query = query.col_expr(Column::Email, Expr::value(email));
    }
    if let Some(hash) = changes.password_hash {
        query = query.col_expr(Column::Password, Expr::value(hash));
    }
    let res = query.filter(Column::Id.eq(id)).exec(db).await?;
    Ok(res.rows_affected)
}

/// Remove the user row; owned addresses go with it through the FK cascade.
pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
