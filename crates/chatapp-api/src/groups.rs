use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use chatapp_types::api::{AddUserToGroupRequest, CreateGroupRequest, CreateGroupResponse};

use crate::AppState;
use crate::error::ApiError;

pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // The group insert and the creator's membership commit together, so a
    // group can never exist without at least its creator as a member.
    let group_id = state.db.create_group(&req.group_name, req.creator_id)?;
    info!("group '{}' ({}) created by {}", req.group_name, group_id, req.creator_id);

    Ok((StatusCode::CREATED, Json(CreateGroupResponse { group_id })))
}

pub async fn add_user_to_group(
    State(state): State<AppState>,
    Json(req): Json<AddUserToGroupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.user_exists(req.user_id)? {
        return Err(ApiError::NotFound("user"));
    }
    if !state.db.group_exists(req.group_id)? {
        return Err(ApiError::NotFound("group"));
    }

    state.db.add_group_member(req.user_id, req.group_id)?;
    Ok(StatusCode::CREATED)
}
