use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::db::user_ops;
use crate::db::users::Model as UserModel;
use crate::error::AppError;
use crate::state::AppState;
use storefront_core::Role;

/// JWT claims for an authenticated session.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<Role>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// The user row behind the bearer token, inserted into request extensions by
/// the auth middleware.
#[derive(Clone)]
pub(crate) struct CurrentUser(pub UserModel);

pub struct BearerToken(pub String);

/// JWT secret from the environment, with a fixed fallback for development.
fn get_jwt_secret() -> String {
    let secret = std::env::var("STOREFRONT_JWT_SECRET").unwrap_or_else(|_| {
        warn!(
            "Using default JWT secret. Please set STOREFRONT_JWT_SECRET environment variable in production!"
        );
        "storefront_default_jwt_secret_change_in_production".to_string()
    });

    if secret.len() < 32 {
        error!("JWT secret is too short (minimum 32 characters required)");
        panic!("JWT secret must be at least 32 characters long");
    }

    secret
}

pub(crate) fn sign_token(user: &UserModel) -> Result<String, AppError> {
    let secret = get_jwt_secret();
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user.id.to_string(),
        roles: user.roles.0.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let header = Header::new(jsonwebtoken::Algorithm::HS256);

    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref())).map_err(|e| {
        error!("Failed to encode JWT: {}", e);
        AppError::Internal("Failed to create token".to_string())
    })
}

pub(crate) fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = get_jwt_secret();

    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 60;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|e| {
        warn!("JWT verification failed: {}", e);
        AppError::Unauthenticated("Invalid token".to_string())
    })?;

    Ok(token_data.claims)
}

pub(crate) fn extract_bearer_token(request: &Request) -> Result<BearerToken, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthenticated(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = auth_header.trim_start_matches("Bearer ").to_string();
    Ok(BearerToken(token))
}

/// Authentication middleware: verifies the bearer JWT, re-fetches the user it
/// names and makes both available to the handlers.
pub(crate) async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let BearerToken(token) = extract_bearer_token(&request)?;
    let claims = verify_token(&token)?;

    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthenticated("Invalid user id in token".to_string()))?;

    let user = user_ops::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User not found".to_string()))?;

    request.extensions_mut().insert(CurrentUser(user));
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Per-route role declaration, checked against the authenticated caller.
pub(crate) fn require_roles(user: &UserModel, required: &[Role]) -> Result<(), AppError> {
    if storefront_core::authorize(required, &user.roles.0) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
