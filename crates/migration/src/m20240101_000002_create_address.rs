//! Create `address` table with FK to `user`.
//!
//! Deleting a user removes every address it owns (ON DELETE CASCADE).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(uuid(Address::Id).primary_key())
                    .col(string(Address::Alias).not_null())
                    .col(string(Address::Address).not_null())
                    .col(ColumnDef::new(Address::Number).big_integer().null())
                    .col(string_len(Address::Cep, 32).not_null())
                    .col(string(Address::City).not_null())
                    .col(string(Address::State).not_null())
                    .col(string(Address::Country).not_null())
                    .col(uuid(Address::UserId).not_null())
                    .col(timestamp_with_time_zone(Address::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Address::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_user")
                            .from(Address::Table, Address::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address {
    Table,
    Id,
    Alias,
    Address,
    Number,
    Cep,
    City,
    State,
    Country,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
