//! Create `person` table.
//!
//! The email uniqueness constraint lives in the index migration that runs after it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(string_len(Person::Email, 255).not_null())
                    .col(timestamp_with_time_zone(Person::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Person::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Person { Table, Id, Email, CreatedAt, UpdatedAt }
