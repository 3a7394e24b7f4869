use sea_orm_migration::prelude::*;
use sea_orm_migration::schema;

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Products::Table)
            .if_not_exists()
            .col(schema::uuid(Products::Id).primary_key())
            .col(schema::string(Products::Title))
            .col(schema::string(Products::Photo))
            .col(schema::big_integer(Products::Price))
            .col(schema::string_uniq(Products::Slug))
            .to_owned();
        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Title,
    Photo,
    Price,
    Slug,
}
