use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use sweetshop_core::json::ApiJson;
use sweetshop_domain::user::{User, UserRole};

use crate::error::ShopError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

async fn register_with_role(
    state: AppState,
    body: CredentialsRequest,
    role: UserRole,
) -> Result<(StatusCode, Json<UserResponse>), ShopError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ShopError> {
    register_with_role(state, body, UserRole::User).await
}

// ── POST /api/auth/register-admin ────────────────────────────────────────────

/// Open admin self-registration, kept for the demo storefront.
pub async fn register_admin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ShopError> {
    register_with_role(state, body, UserRole::Admin).await
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ShopError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
        jwt_secret: state.jwt_secret.clone(),
        jwt_expires_in: state.jwt_expires_in,
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: out.token,
        user: out.user,
    }))
}
