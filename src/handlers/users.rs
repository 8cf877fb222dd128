use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, verify_password, AuthUser};
use crate::models::user::{LoginInput, ProfileUpdateInput, RegisterInput, Role, User, UserSummary};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, success};

#[derive(Serialize)]
struct AuthPayload {
    user: UserSummary,
    token: String,
}

pub async fn register_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> Result<Response, AppError> {
    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::Validation(
            "User already exists with this email".to_string(),
        ));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        password_hash: hash_password(&input.password)?,
        phone: input.phone,
        role: Role::User,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.users.insert(&user).await?;

    let token = issue_token(&user, &state.config.jwt_secret)?;
    tracing::info!(user_id = %user.id, "User registered");

    let payload = AuthPayload {
        user: user.summary(),
        token,
    };
    Ok(created(payload, "User registered successfully"))
}

pub async fn login_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> Result<Response, AppError> {
    // One message for both unknown email and bad password.
    let invalid = || AppError::Auth("Invalid email or password".to_string());

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&input.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = issue_token(&user, &state.config.jwt_secret)?;

    let payload = AuthPayload {
        user: user.summary(),
        token,
    };
    Ok(success(payload, "Login successful"))
}

pub async fn get_profile(AuthUser(user): AuthUser) -> Response {
    success(user, "User data fetched successfully")
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<ProfileUpdateInput>,
) -> Result<Response, AppError> {
    let updated = state
        .users
        .update_profile(user.id, &input.name, input.phone.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(success(updated, "Profile updated successfully"))
}

pub async fn get_user_bookings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Response, AppError> {
    let bookings: Vec<_> = state
        .bookings
        .list_for_user_detailed(user.id)
        .await?
        .into_iter()
        .map(|row| row.into_detail(false))
        .collect();

    Ok(success(bookings, "User bookings fetched successfully"))
}
