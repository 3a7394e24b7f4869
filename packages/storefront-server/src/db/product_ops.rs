use crate::db::products::{self, Entity as Products, Model as ProductModel};
use crate::error::AppError;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use storefront_core::slug_gen;
use tracing::warn;
use uuid::Uuid;

pub(crate) struct NewProduct {
    pub title: String,
    pub photo: String,
    pub price: i64,
    pub slug: Option<String>,
}

#[derive(Default)]
pub(crate) struct ProductChanges {
    pub title: Option<String>,
    pub photo: Option<String>,
    pub price: Option<i64>,
    pub slug: Option<String>,
}

pub(crate) async fn find_all(db: &DatabaseConnection) -> Result<Vec<ProductModel>, AppError> {
    Ok(Products::find().all(db).await?)
}

pub(crate) async fn find_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<ProductModel>, AppError> {
    Ok(Products::find_by_id(id).one(db).await?)
}

pub(crate) async fn find_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<ProductModel>, AppError> {
    Ok(Products::find()
        .filter(products::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Exact title match.
pub(crate) async fn find_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Vec<ProductModel>, AppError> {
    Ok(Products::find()
        .filter(products::Column::Title.eq(title))
        .all(db)
        .await?)
}

pub(crate) async fn find_by_ids(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> Result<Vec<ProductModel>, AppError> {
    Ok(Products::find()
        .filter(products::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?)
}

pub(crate) async fn create(
    db: &DatabaseConnection,
    data: NewProduct,
) -> Result<ProductModel, AppError> {
    let slug = data
        .slug
        .unwrap_or_else(|| slug_gen::generate(&data.title));

    let new_product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(data.title),
        photo: Set(data.photo),
        price: Set(data.price),
        slug: Set(slug),
    };

    new_product
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create product: {e}")))
}

pub(crate) async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    changes: ProductChanges,
) -> Result<ProductModel, AppError> {
    let product = find_by_id(db, id).await?.ok_or_else(|| {
        AppError::NotFound("Product with that id has not been found".to_string())
    })?;

    let slug = slug_gen::slug_for_update(
        changes.slug.as_deref(),
        changes.title.as_deref(),
        &product.title,
        &product.slug,
    );

    let mut active: products::ActiveModel = product.into();
    if let Some(title) = changes.title {
        active.title = Set(title);
    }
    if let Some(photo) = changes.photo {
        active.photo = Set(photo);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }
    active.slug = Set(slug);

    active
        .update(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update product: {e}")))?;

    find_by_id(db, id).await?.ok_or_else(|| {
        AppError::NotFound("Product with that id has not been found".to_string())
    })
}

pub(crate) async fn delete(db: &DatabaseConnection, id: Uuid) -> bool {
    match Products::delete_by_id(id).exec(db).await {
        Ok(_) => true,
        Err(err) => {
            warn!(error = %err, "product delete failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_db;

    async fn seed(db: &DatabaseConnection, title: &str, slug: Option<&str>) -> ProductModel {
        create(
            db,
            NewProduct {
                title: title.to_string(),
                photo: "https://cdn.example.com/photo.png".to_string(),
                price: 1999,
                slug: slug.map(str::to_string),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_derives_slug_from_title() {
        let db = setup_db().await;
        let product = seed(&db, "Wireless Keyboard", None).await;
        assert_eq!(product.slug, "wireless-keyboard");
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_slug() {
        let db = setup_db().await;
        let product = seed(&db, "Wireless Keyboard", Some("custom-slug")).await;
        assert_eq!(product.slug, "custom-slug");
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let db = setup_db().await;
        let err = update(&db, Uuid::new_v4(), ProductChanges::default())
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("Product with that id has not been found")
        );
    }

    #[tokio::test]
    async fn test_update_title_regenerates_auto_derived_slug() {
        let db = setup_db().await;
        let product = seed(&db, "Wireless Keyboard", None).await;

        let updated = update(
            &db,
            product.id,
            ProductChanges {
                title: Some("Mechanical Keyboard".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Mechanical Keyboard");
        assert_eq!(updated.slug, "mechanical-keyboard");
    }

    #[tokio::test]
    async fn test_update_title_keeps_hand_set_slug() {
        let db = setup_db().await;
        let product = seed(&db, "Wireless Keyboard", Some("custom-slug")).await;

        let updated = update(
            &db,
            product.id,
            ProductChanges {
                title: Some("Mechanical Keyboard".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Mechanical Keyboard");
        assert_eq!(updated.slug, "custom-slug");
    }

    #[tokio::test]
    async fn test_update_explicit_slug_wins() {
        let db = setup_db().await;
        let product = seed(&db, "Wireless Keyboard", None).await;

        let updated = update(
            &db,
            product.id,
            ProductChanges {
                title: Some("Mechanical Keyboard".to_string()),
                slug: Some("provided-slug".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.slug, "provided-slug");
    }

    #[tokio::test]
    async fn test_find_by_ids_drops_unknown_ids() {
        let db = setup_db().await;
        let product = seed(&db, "Desk Lamp", None).await;

        let found = find_by_ids(&db, &[product.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, product.id);
    }

    #[tokio::test]
    async fn test_find_by_title_and_slug() {
        let db = setup_db().await;
        let product = seed(&db, "Desk Lamp", None).await;

        let by_title = find_by_title(&db, "Desk Lamp").await.unwrap();
        assert_eq!(by_title.len(), 1);

        let by_slug = find_by_slug(&db, "desk-lamp").await.unwrap();
        assert_eq!(by_slug.map(|p| p.id), Some(product.id));
    }

    #[tokio::test]
    async fn test_delete_is_flattened_to_bool() {
        let db = setup_db().await;
        let product = seed(&db, "Desk Lamp", None).await;

        assert!(delete(&db, product.id).await);
        assert!(find_by_id(&db, product.id).await.unwrap().is_none());

        // the statement itself succeeds even when nothing matches
        assert!(delete(&db, Uuid::new_v4()).await);
    }
}
