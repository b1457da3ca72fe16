use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use chatapp_types::api::{LoginRequest, LoginResponse, SignUpRequest, SignUpResponse};

use crate::AppState;
use crate::error::ApiError;

// Passwords are stored and compared verbatim. This is a known deficiency
// carried over from the deployment this service replaces; it must not be
// exposed beyond a trusted network until password hashing lands.

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state.db.get_user_by_name(&req.user_name)?.is_some() {
        return Err(ApiError::DuplicateUser);
    }

    let user_id = state.db.create_user(&req.user_name, &req.password)?;
    info!("registered user '{}' ({})", req.user_name, user_id);

    Ok((StatusCode::CREATED, Json(SignUpResponse { user_id })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Unknown user and wrong password both answer 401, so a caller cannot
    // probe which user names exist.
    let user = state
        .db
        .get_user_by_name(&req.user_name)?
        .ok_or(ApiError::InvalidCredentials)?;

    if user.password != req.password {
        return Err(ApiError::InvalidCredentials);
    }

    // No session token is issued; subsequent requests are unauthenticated.
    Ok((
        StatusCode::ACCEPTED,
        Json(LoginResponse {
            user_id: user.id,
            user_name: user.user_name,
        }),
    ))
}
