use crate::db::Orders;
use crate::db::users::{self, Entity as Users, Model as UserModel, Roles};
use crate::error::AppError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

pub(crate) struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A user together with their orders. The orders collection is always
/// materialized, empty when the user has none.
pub(crate) struct UserWithOrders {
    pub user: UserModel,
    pub orders: Vec<crate::db::orders::Model>,
}

pub(crate) async fn create(db: &DatabaseConnection, data: NewUser) -> Result<UserModel, AppError> {
    let now = Utc::now();
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(data.email),
        username: Set(data.username),
        password_hash: Set(data.password_hash),
        roles: Set(Roles::default()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {e}")))
}

pub(crate) async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<UserModel>, AppError> {
    Users::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to find user: {e}")))
}

pub(crate) async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<UserModel>, AppError> {
    Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to find user: {e}")))
}

pub(crate) async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<UserModel>, AppError> {
    Users::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to find user: {e}")))
}

pub(crate) async fn find_by_id_with_orders(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<UserWithOrders>, AppError> {
    let Some(user) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let orders = user
        .find_related(Orders)
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to load user orders: {e}")))?;

    Ok(Some(UserWithOrders { user, orders }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_order, seed_product, seed_user, setup_db};
    use storefront_core::Role;

    #[tokio::test]
    async fn test_create_defaults_to_user_role() {
        let db = setup_db().await;
        let user = create(
            &db,
            NewUser {
                username: "customer".to_string(),
                email: "customer@example.com".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.roles.0, vec![Role::User]);
        assert!(!user.roles.is_admin());
    }

    #[tokio::test]
    async fn test_lookups_by_email_and_username() {
        let db = setup_db().await;
        let user = seed_user(&db, "wolfgang", "wolfgang@example.com", vec![Role::User]).await;

        let by_email = find_by_email(&db, "wolfgang@example.com").await.unwrap();
        assert_eq!(by_email.as_ref().map(|u| u.id), Some(user.id));

        let by_username = find_by_username(&db, "wolfgang").await.unwrap();
        assert_eq!(by_username.as_ref().map(|u| u.id), Some(user.id));

        assert!(find_by_email(&db, "nobody@example.com").await.unwrap().is_none());
        assert!(find_by_username(&db, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orders_collection_is_always_present() {
        let db = setup_db().await;
        let user = seed_user(&db, "shopper", "shopper@example.com", vec![Role::User]).await;

        let fresh = find_by_id_with_orders(&db, user.id).await.unwrap().unwrap();
        assert!(fresh.orders.is_empty());

        let product = seed_product(&db, "Desk Lamp").await;
        seed_order(&db, &user, &[product]).await;

        let loaded = find_by_id_with_orders(&db, user.id).await.unwrap().unwrap();
        assert_eq!(loaded.orders.len(), 1);
    }
}
