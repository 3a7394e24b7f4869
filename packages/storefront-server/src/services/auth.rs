//! Registration and credential verification, independent of the HTTP layer.

use bcrypt::{DEFAULT_COST, hash, verify};
use sea_orm::DatabaseConnection;
use tracing::error;

use crate::auth::sign_token;
use crate::db::user_ops::{self, NewUser};
use crate::db::users::Model as UserModel;
use crate::error::AppError;

pub(crate) struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        error!("Failed to hash password: {}", e);
        AppError::Internal("Failed to process password".to_string())
    })
}

/// Any failure from the hashing primitive counts as a mismatch.
pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

/// Email uniqueness is checked before username; the first hit wins and the
/// other lookup is skipped.
pub(crate) async fn register(
    db: &DatabaseConnection,
    data: Registration,
) -> Result<UserModel, AppError> {
    if user_ops::find_by_email(db, &data.email).await?.is_some() {
        return Err(AppError::Conflict(
            "User with that email already exists".to_string(),
        ));
    }

    if user_ops::find_by_username(db, &data.username).await?.is_some() {
        return Err(AppError::Conflict(
            "User with that username already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&data.password)?;

    user_ops::create(
        db,
        NewUser {
            username: data.username,
            email: data.email,
            password_hash,
        },
    )
    .await
}

/// Unknown email and wrong password produce the same error on purpose, so a
/// caller cannot tell which of the two was the case.
pub(crate) async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<UserModel, AppError> {
    let user = user_ops::find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::Authentication("Wrong credentials provided".to_string()))?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::Authentication(
            "Wrong credentials provided".to_string(),
        ));
    }

    Ok(user)
}

pub(crate) async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = authenticate(db, email, password).await?;
    sign_token(&user)
}
