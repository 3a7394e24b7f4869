use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CurrentUser, auth_middleware, require_roles};
use crate::db::order_ops::{self, OrderWithRelations};
use crate::db::products::Model as ProductModel;
use crate::error::AppError;
use crate::routes::DeleteResponse;
use crate::routes::auth::{UserResponse, user_response};
use crate::state::AppState;
use storefront_core::Role;

pub(crate) fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find_all))
        .route("/", post(create))
        .route("/user", get(find_all_by_user))
        .route("/cancel/{id}", put(cancel))
        .route("/process/{id}", put(process))
        .route("/{id}", delete(delete_order))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub is_processed: bool,
    pub is_canceled: bool,
    pub user: Option<UserResponse>,
    pub products: Vec<ProductModel>,
}

fn order_response(found: OrderWithRelations) -> OrderResponse {
    OrderResponse {
        id: found.order.id,
        created_at: found.order.created_at,
        is_processed: found.order.is_processed,
        is_canceled: found.order.is_canceled,
        user: found.user.as_ref().map(user_response),
        products: found.products,
    }
}

async fn find_all(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    require_roles(&user, &[Role::Admin])?;

    let orders = order_ops::find_all(&state.db).await?;
    Ok(Json(orders.into_iter().map(order_response).collect()))
}

async fn find_all_by_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    require_roles(&user, &[Role::User])?;

    let orders = order_ops::find_all_by_user(&state.db, user.id).await?;
    Ok(Json(orders.into_iter().map(order_response).collect()))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_roles(&user, &[Role::User])?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let order = order_ops::create(&state.db, &request.product_ids, &user).await?;
    Ok((StatusCode::CREATED, Json(order_response(order))))
}

async fn cancel(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    require_roles(&user, &[Role::User])?;

    let order = order_ops::cancel(&state.db, id, Some(&user)).await?;
    Ok(Json(order_response(order)))
}

async fn process(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    require_roles(&user, &[Role::Admin])?;

    let order = order_ops::process(&state.db, id).await?;
    Ok(Json(order_response(order)))
}

async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    require_roles(&user, &[Role::Admin])?;

    let deleted = order_ops::delete(&state.db, id).await;
    Ok(Json(DeleteResponse { deleted }))
}
