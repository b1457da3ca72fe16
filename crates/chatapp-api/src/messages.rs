use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use chatapp_db::models::MessageRow;
use chatapp_types::api::{MessageResponse, SendMessageRequest};
use chatapp_types::models::MessageTarget;

use crate::AppState;
use crate::error::ApiError;

pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let target = MessageTarget::from_parts(req.receiver_id, req.group_id)
        .ok_or(ApiError::BadRequest("either receiver_id or group_id is required"))?;

    // Sender/receiver/group existence is not checked here; `sent_at` is
    // assigned by the database at insert.
    let db = state.clone();
    let id = tokio::task::spawn_blocking(move || {
        db.db.insert_message(req.sender_id, target, &req.content)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    // Run the blocking DB scan off the async runtime
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_messages(user_id))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let messages: Vec<MessageResponse> = rows.into_iter().map(to_response).collect();
    Ok(Json(messages))
}

fn to_response(row: MessageRow) -> MessageResponse {
    let sent_at = row
        .sent_at
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without
            // timezone. Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(&row.sent_at, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt sent_at '{}' on message {}: {}", row.sent_at, row.id, e);
            DateTime::default()
        });

    MessageResponse {
        id: row.id,
        sender_id: row.sender_id,
        receiver_id: row.receiver_id,
        group_id: row.group_id,
        content: row.content,
        sent_at,
    }
}
