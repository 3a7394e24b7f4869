use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CurrentUser, auth_middleware, require_roles};
use crate::db::product_ops::{self, NewProduct, ProductChanges};
use crate::db::products::Model as ProductModel;
use crate::error::AppError;
use crate::routes::DeleteResponse;
use crate::state::AppState;
use storefront_core::Role;

pub(crate) fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected_router = Router::new()
        .route("/", post(create))
        .route("/{id}", put(update))
        .route("/{id}", delete(delete_product))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(find_all))
        .route("/id/{id}", get(find_by_id))
        .route("/slug/{slug}", get(find_by_slug))
        .route("/title/{title}", get(find_by_title))
        .merge(protected_router)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(url)]
    pub photo: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(url)]
    pub photo: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub slug: Option<String>,
}

async fn find_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductModel>>, AppError> {
    Ok(Json(product_ops::find_all(&state.db).await?))
}

async fn find_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<ProductModel>>, AppError> {
    Ok(Json(product_ops::find_by_id(&state.db, id).await?))
}

async fn find_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Option<ProductModel>>, AppError> {
    Ok(Json(product_ops::find_by_slug(&state.db, &slug).await?))
}

async fn find_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<Vec<ProductModel>>, AppError> {
    Ok(Json(product_ops::find_by_title(&state.db, &title).await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_roles(&user, &[Role::User])?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = product_ops::create(
        &state.db,
        NewProduct {
            title: request.title,
            photo: request.photo,
            price: request.price,
            slug: request.slug,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductModel>, AppError> {
    require_roles(&user, &[Role::Admin])?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = product_ops::update(
        &state.db,
        id,
        ProductChanges {
            title: request.title,
            photo: request.photo,
            price: request.price,
            slug: request.slug,
        },
    )
    .await?;

    Ok(Json(product))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    require_roles(&user, &[Role::Admin])?;

    let deleted = product_ops::delete(&state.db, id).await;
    Ok(Json(DeleteResponse { deleted }))
}
