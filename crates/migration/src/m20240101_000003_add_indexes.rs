use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Address: every query is scoped by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_address_user")
                    .table(Address::Table)
                    .col(Address::UserId)
                    .to_owned(),
            )
            .await?;

        // Address: owner + city is the most common filter
        manager
            .create_index(
                Index::create()
                    .name("idx_address_user_city")
                    .table(Address::Table)
                    .col(Address::UserId)
                    .col(Address::City)
                    .to_owned(),
            )
            .await?;

        // User: listing is ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_user_created_at")
                    .table(User::Table)
                    .col(User::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_address_user").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_address_user_city").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_created_at").table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, CreatedAt }

#[derive(DeriveIden)]
enum Address { Table, UserId, City }
