use crate::db::migration::m00001_create_table_users::Users;
use crate::db::migration::m00002_create_table_products::Products;
use sea_orm_migration::prelude::*;
use sea_orm_migration::schema;

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let orders_table = Table::create()
            .table(Orders::Table)
            .if_not_exists()
            .col(schema::uuid(Orders::Id).primary_key())
            .col(schema::timestamp_with_time_zone(Orders::CreatedAt))
            .col(schema::boolean(Orders::IsProcessed).default(false))
            .col(schema::boolean(Orders::IsCanceled).default(false))
            .col(schema::uuid(Orders::UserId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_orders_user_id")
                    .from(Orders::Table, Orders::UserId)
                    .to(Users::Table, Users::Id),
            )
            .to_owned();

        // Join-table rows go away with their order or product.
        let order_products_table = Table::create()
            .table(OrderProducts::Table)
            .if_not_exists()
            .col(schema::uuid(OrderProducts::OrderId))
            .col(schema::uuid(OrderProducts::ProductId))
            .primary_key(
                Index::create()
                    .col(OrderProducts::OrderId)
                    .col(OrderProducts::ProductId),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_order_products_order_id")
                    .from(OrderProducts::Table, OrderProducts::OrderId)
                    .to(Orders::Table, Orders::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_order_products_product_id")
                    .from(OrderProducts::Table, OrderProducts::ProductId)
                    .to(Products::Table, Products::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();

        manager.create_table(orders_table).await?;
        manager.create_table(order_products_table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Orders {
    Table,
    Id,
    CreatedAt,
    IsProcessed,
    IsCanceled,
    UserId,
}

#[derive(DeriveIden)]
pub(crate) enum OrderProducts {
    Table,
    OrderId,
    ProductId,
}
