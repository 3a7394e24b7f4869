use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CurrentUser, auth_middleware};
use crate::db::user_ops;
use crate::db::users::Model as UserModel;
use crate::error::AppError;
use crate::services::auth::{self as auth_service, Registration};
use crate::state::AppState;
use storefront_core::Role;

pub(crate) fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected_router = Router::new()
        .route("/profile", get(profile))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/sign-in", post(sign_in))
        .merge(protected_router)
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 6, max = 26))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 20))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Sanitized user projection; the password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub orders: Vec<crate::db::orders::Model>,
}

pub(crate) fn user_response(user: &UserModel) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        roles: user.roles.0.clone(),
        created_at: user.created_at.to_string(),
    }
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = auth_service::register(
        &state.db,
        Registration {
            username: request.username,
            email: request.email,
            password: request.password,
        },
    )
    .await?;

    info!("User registered successfully: {}", user.username);

    Ok((StatusCode::CREATED, Json(user_response(&user))))
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let access_token = auth_service::login(&state.db, &request.email, &request.password).await?;

    info!("User signed in successfully: {}", request.email);

    Ok(Json(SignInResponse { access_token }))
}

async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let found = user_ops::find_by_id_with_orders(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: user_response(&found.user),
        orders: found.orders,
    }))
}
