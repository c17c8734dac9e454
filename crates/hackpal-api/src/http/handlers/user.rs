//! Account HTTP handlers: signup, login, logout.

use axum::extract::State;
use secrecy::SecretString;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::response::{ApiResponse, StatusMessagePayload, UserPayload, UserView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupBody {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// POST /api/users/signup
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupBody>,
) -> Result<ApiResponse<UserPayload>, AppError> {
    let user = state
        .accounts
        .signup(
            body.username.as_deref(),
            body.email.as_deref(),
            body.password.as_ref(),
        )
        .await?;
    Ok(ApiResponse::created(UserPayload {
        user: UserView::with_email(user),
    }))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginBody>,
) -> Result<ApiResponse<UserPayload>, AppError> {
    let user = state
        .accounts
        .login(body.email.as_deref(), body.password.as_ref())
        .await?;
    Ok(ApiResponse::ok(UserPayload {
        user: UserView::without_email(user),
    }))
}

/// GET /api/users/logout
pub async fn logout(State(state): State<AppState>) -> ApiResponse<StatusMessagePayload> {
    ApiResponse::ok(StatusMessagePayload {
        message: state.accounts.logout(),
    })
}
