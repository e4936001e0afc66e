use crate::{
    types::{AppError, LoginRequest, Result, TokenResponse},
    AppState,
};
use axum::{extract::State, Json};

/// External message for every credential failure. An unknown email and a
/// wrong password must be indistinguishable to the caller.
const AUTH_FAILED: &str = "Authentication failed";

/// Login with email and password, receiving a signed bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    // Look up exactly one account for the supplied email
    let account = match state.store.get_account_by_email(&payload.email).await? {
        Some(account) => account,
        None => {
            tracing::debug!("login rejected: unknown identifier");
            return Err(AppError::Auth(AUTH_FAILED.to_string()));
        }
    };

    // Verify the password against the stored Argon2 hash
    if !state
        .auth_service
        .verify_password(&payload.password, &account.secret_hash)?
    {
        tracing::debug!(account_id = %account.id, "login rejected: secret mismatch");
        return Err(AppError::Auth(AUTH_FAILED.to_string()));
    }

    // Issue the time-boxed token
    let token = state.auth_service.issue_token(&account.id, &account.email)?;

    Ok(Json(TokenResponse { token }))
}
