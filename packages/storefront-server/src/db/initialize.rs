use crate::db::migration::{
    m00001_create_table_users, m00002_create_table_products, m00003_create_table_orders,
};
use sea_orm::{DbConn, DbErr};
use sea_orm_migration::{MigrationTrait, MigratorTrait};

pub(crate) async fn initial(db_cnn: &DbConn) -> Result<(), DbErr> {
    Migrator::up(db_cnn, None).await
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m00001_create_table_users::Migration),
            Box::new(m00002_create_table_products::Migration),
            Box::new(m00003_create_table_orders::Migration),
        ]
    }
}
