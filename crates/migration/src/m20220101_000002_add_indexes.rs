use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_person::Person;

/// Name of the unique index backing the one-person-per-email rule.
pub const UNIQ_PERSON_EMAIL: &str = "uniq_person_email";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Person: unique email, case-sensitive (plain column, no lower())
        manager
            .create_index(
                Index::create()
                    .name(UNIQ_PERSON_EMAIL)
                    .table(Person::Table)
                    .col(Person::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(UNIQ_PERSON_EMAIL).table(Person::Table).to_owned())
            .await
    }
}
