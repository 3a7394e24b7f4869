use crate::db::users::{self, Model as UserModel, Roles};
use crate::db::{order_ops, product_ops};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use storefront_core::Role;
use uuid::Uuid;

pub(crate) async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    crate::db::initialize::initial(&db).await.unwrap();
    db
}

pub(crate) async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    roles: Vec<Role>,
) -> UserModel {
    let now = Utc::now();
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        username: Set(username.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        roles: Set(Roles(roles)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub(crate) async fn seed_product(
    db: &DatabaseConnection,
    title: &str,
) -> crate::db::products::Model {
    product_ops::create(
        db,
        product_ops::NewProduct {
            title: title.to_string(),
            photo: "https://cdn.example.com/photo.png".to_string(),
            price: 2599,
            slug: None,
        },
    )
    .await
    .unwrap()
}

pub(crate) async fn seed_order(
    db: &DatabaseConnection,
    user: &UserModel,
    products: &[crate::db::products::Model],
) -> order_ops::OrderWithRelations {
    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    order_ops::create(db, &ids, user).await.unwrap()
}
