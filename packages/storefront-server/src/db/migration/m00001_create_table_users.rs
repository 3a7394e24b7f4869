use sea_orm_migration::prelude::*;
use sea_orm_migration::schema;

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Users::Table)
            .if_not_exists()
            .col(schema::uuid(Users::Id).primary_key())
            .col(schema::string_uniq(Users::Email))
            .col(schema::string_uniq(Users::Username))
            .col(schema::string(Users::PasswordHash))
            .col(schema::json(Users::Roles))
            .col(schema::timestamp_with_time_zone(Users::CreatedAt))
            .col(schema::timestamp_with_time_zone(Users::UpdatedAt))
            .to_owned();
        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
    Roles,
    CreatedAt,
    UpdatedAt,
}
