use crate::db::order_products::{self, Entity as OrderProducts};
use crate::db::orders::{self, Entity as Orders};
use crate::db::product_ops;
use crate::db::products::{Entity as Products, Model as ProductModel};
use crate::db::users::{Entity as Users, Model as UserModel};
use crate::error::AppError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, Set,
};
use tracing::warn;
use uuid::Uuid;

/// An order with its owner and product set expanded.
#[derive(Debug)]
pub(crate) struct OrderWithRelations {
    pub order: orders::Model,
    pub user: Option<UserModel>,
    pub products: Vec<ProductModel>,
}

/// Requested ids that resolve to no product are dropped silently; only a
/// fully empty resolution rejects the order.
pub(crate) async fn create(
    db: &DatabaseConnection,
    product_ids: &[Uuid],
    user: &UserModel,
) -> Result<OrderWithRelations, AppError> {
    let products = product_ops::find_by_ids(db, product_ids).await?;
    if products.is_empty() {
        return Err(AppError::BadRequest(
            "Products with provided ids have not been found".to_string(),
        ));
    }

    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(Utc::now()),
        is_processed: Set(false),
        is_canceled: Set(false),
        user_id: Set(user.id),
    }
    .insert(db)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create order: {e}")))?;

    let links = products.iter().map(|product| order_products::ActiveModel {
        order_id: Set(order.id),
        product_id: Set(product.id),
    });
    OrderProducts::insert_many(links)
        .exec(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to attach products to order: {e}")))?;

    Ok(OrderWithRelations {
        order,
        user: Some(user.clone()),
        products,
    })
}

async fn with_relations(
    db: &DatabaseConnection,
    orders_list: Vec<orders::Model>,
) -> Result<Vec<OrderWithRelations>, AppError> {
    let users = orders_list
        .load_one(Users, db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to load order users: {e}")))?;
    let products = orders_list
        .load_many_to_many(Products, OrderProducts, db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to load order products: {e}")))?;

    Ok(orders_list
        .into_iter()
        .zip(users)
        .zip(products)
        .map(|((order, user), products)| OrderWithRelations {
            order,
            user,
            products,
        })
        .collect())
}

pub(crate) async fn find_all(db: &DatabaseConnection) -> Result<Vec<OrderWithRelations>, AppError> {
    let orders_list = Orders::find()
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list orders: {e}")))?;
    with_relations(db, orders_list).await
}

pub(crate) async fn find_all_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<OrderWithRelations>, AppError> {
    let orders_list = Orders::find()
        .filter(orders::Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list user orders: {e}")))?;
    with_relations(db, orders_list).await
}

pub(crate) async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<OrderWithRelations>, AppError> {
    let Some(order) = Orders::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to find order: {e}")))?
    else {
        return Ok(None);
    };

    Ok(with_relations(db, vec![order]).await?.pop())
}

pub(crate) async fn find_by_id_or_fail(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<OrderWithRelations, AppError> {
    find_by_id(db, id).await?.ok_or_else(|| {
        AppError::NotFound("Order with provided id has not been found".to_string())
    })
}

/// Cancel an order. When an acting user is supplied they must be an admin or
/// the order's owner; admin-only callers may pass `None` to skip the check.
pub(crate) async fn cancel(
    db: &DatabaseConnection,
    id: Uuid,
    acting_user: Option<&UserModel>,
) -> Result<OrderWithRelations, AppError> {
    let found = find_by_id_or_fail(db, id).await?;

    if let Some(user) = acting_user {
        if !user.roles.is_admin() && found.order.user_id != user.id {
            return Err(AppError::Forbidden);
        }
    }

    if found.order.is_canceled {
        return Err(AppError::BadRequest("Order is already canceled".to_string()));
    }

    let mut active: orders::ActiveModel = found.order.into();
    active.is_canceled = Set(true);
    active
        .update(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to cancel order: {e}")))?;

    find_by_id_or_fail(db, id).await
}

pub(crate) async fn process(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<OrderWithRelations, AppError> {
    let found = find_by_id_or_fail(db, id).await?;

    if found.order.is_processed {
        return Err(AppError::BadRequest(
            "Order is already processed".to_string(),
        ));
    }
    if found.order.is_canceled {
        return Err(AppError::BadRequest("Order is canceled".to_string()));
    }

    let mut active: orders::ActiveModel = found.order.into();
    active.is_processed = Set(true);
    active
        .update(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to process order: {e}")))?;

    find_by_id_or_fail(db, id).await
}

pub(crate) async fn delete(db: &DatabaseConnection, id: Uuid) -> bool {
    match Orders::delete_by_id(id).exec(db).await {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "order delete failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_product, seed_user, setup_db};
    use storefront_core::Role;

    #[tokio::test]
    async fn test_create_rejects_empty_resolution() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;

        let err = create(&db, &[Uuid::new_v4()], &user).await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Products with provided ids have not been found")
        );
        assert!(find_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_drops_missing_ids_silently() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;

        let created = create(&db, &[product.id, Uuid::new_v4()], &user)
            .await
            .unwrap();

        assert_eq!(created.products.len(), 1);
        assert_eq!(created.products[0].id, product.id);
        assert!(!created.order.is_processed);
        assert!(!created.order.is_canceled);
    }

    #[tokio::test]
    async fn test_find_all_expands_user_and_products() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let lamp = seed_product(&db, "Desk Lamp").await;
        let mug = seed_product(&db, "Coffee Mug").await;
        create(&db, &[lamp.id, mug.id], &user).await.unwrap();

        let all = find_all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user.as_ref().map(|u| u.id), Some(user.id));
        assert_eq!(all[0].products.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_by_user_filters_owner() {
        let db = setup_db().await;
        let alice = seed_user(&db, "alice1", "alice@example.com", vec![Role::User]).await;
        let bob = seed_user(&db, "bobby1", "bob@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        create(&db, &[product.id], &alice).await.unwrap();
        create(&db, &[product.id], &bob).await.unwrap();

        let mine = find_all_by_user(&db, alice.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].order.user_id, alice.id);
    }

    #[tokio::test]
    async fn test_find_by_id_or_fail_unknown_order() {
        let db = setup_db().await;
        let err = find_by_id_or_fail(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Order with provided id has not been found")
        );
    }

    #[tokio::test]
    async fn test_cancel_marks_order_canceled() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &user).await.unwrap();

        let canceled = cancel(&db, created.order.id, Some(&user)).await.unwrap();
        assert!(canceled.order.is_canceled);
        assert!(!canceled.order.is_processed);
    }

    #[tokio::test]
    async fn test_cancel_twice_fails() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &user).await.unwrap();

        cancel(&db, created.order.id, Some(&user)).await.unwrap();
        let err = cancel(&db, created.order.id, Some(&user)).await.unwrap_err();
        assert!(err.to_string().contains("Order is already canceled"));
    }

    #[tokio::test]
    async fn test_cancel_by_non_owner_is_forbidden() {
        let db = setup_db().await;
        let owner = seed_user(&db, "owner1", "owner@example.com", vec![Role::User]).await;
        let other = seed_user(&db, "other1", "other@example.com", vec![Role::User]).await;
        let admin = seed_user(&db, "admin1", "admin@example.com", vec![Role::Admin]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &owner).await.unwrap();

        let err = cancel(&db, created.order.id, Some(&other)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        // the admin is allowed even without owning the order
        let canceled = cancel(&db, created.order.id, Some(&admin)).await.unwrap();
        assert!(canceled.order.is_canceled);
    }

    #[tokio::test]
    async fn test_cancel_without_acting_user_skips_ownership_check() {
        let db = setup_db().await;
        let owner = seed_user(&db, "owner1", "owner@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &owner).await.unwrap();

        let canceled = cancel(&db, created.order.id, None).await.unwrap();
        assert!(canceled.order.is_canceled);
    }

    #[tokio::test]
    async fn test_process_marks_order_processed() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &user).await.unwrap();

        let processed = process(&db, created.order.id).await.unwrap();
        assert!(processed.order.is_processed);

        let err = process(&db, created.order.id).await.unwrap_err();
        assert!(err.to_string().contains("Order is already processed"));
    }

    #[tokio::test]
    async fn test_process_canceled_order_fails() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &user).await.unwrap();

        cancel(&db, created.order.id, Some(&user)).await.unwrap();
        let err = process(&db, created.order.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Order is canceled");
    }

    #[tokio::test]
    async fn test_delete_is_flattened_to_bool() {
        let db = setup_db().await;
        let user = seed_user(&db, "buyer", "buyer@example.com", vec![Role::User]).await;
        let product = seed_product(&db, "Desk Lamp").await;
        let created = create(&db, &[product.id], &user).await.unwrap();

        assert!(delete(&db, created.order.id).await);
        assert!(find_by_id(&db, created.order.id).await.unwrap().is_none());
        assert!(delete(&db, Uuid::new_v4()).await);
    }
}
