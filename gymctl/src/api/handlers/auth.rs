//! Login endpoints for the two portals.
//!
//! `/api/auth/login` serves the platform back office; `/api/gym-auth/login`
//! serves the per-gym admin console. Both verify the same accounts table,
//! but each portal only accepts the roles that belong to it; member accounts
//! cannot log in anywhere. Every failure mode returns the same 401 body so
//! callers cannot probe which emails exist.

use crate::api::models::accounts::{CurrentAccount, Role};
use crate::api::models::auth::{LoginRequest, LoginResponse};
use crate::auth::{password, session};
use crate::db::handlers::{Accounts, AuditLogs, Gyms};
use crate::db::models::logs::AuditLogDBRequest;
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, Json};

fn invalid_credentials() -> Error {
    Error::Unauthorized {
        message: Some("Invalid email or password".to_string()),
    }
}

async fn authenticate(state: &AppState, request: LoginRequest, allowed_roles: &[Role]) -> Result<LoginResponse> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let account = {
        let mut repo = Accounts::new(&mut conn);
        repo.get_by_email(&request.email).await?.ok_or_else(invalid_credentials)?
    };

    if !account.is_active || !allowed_roles.contains(&account.role) {
        return Err(invalid_credentials());
    }

    let is_valid = password::verify_password(request.password, account.password_hash.clone()).await?;
    if !is_valid {
        return Err(invalid_credentials());
    }

    let mut current = CurrentAccount::from(account);
    if let Some(gym_id) = current.gym_id {
        let mut gyms = Gyms::new(&mut conn);
        current.gym_name = gyms.get_by_id(gym_id).await?.map(|gym| gym.name);
    }

    let token = session::create_session_token(&current, &state.config)?;

    let mut logs = AuditLogs::new(&mut conn);
    logs.create(&AuditLogDBRequest {
        actor_email: current.email.clone(),
        action: "auth.login".to_string(),
        entity: "account".to_string(),
        detail: None,
        gym_id: current.gym_id,
    })
    .await?;

    Ok(LoginResponse { token, user: current })
}

/// Login for platform operators.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>> {
    let response = authenticate(&state, request, &[Role::PlatformOperator]).await?;
    Ok(Json(response))
}

/// Login for gym admins.
#[utoipa::path(
    post,
    path = "/api/gym-auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn gym_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let response = authenticate(&state, request, &[Role::GymAdmin]).await?;
    Ok(Json(response))
}
