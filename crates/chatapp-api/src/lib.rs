pub mod auth;
pub mod error;
pub mod groups;
pub mod messages;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use chatapp_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// All routes under `/chatapp`. Built separately from the binary so
/// integration tests can drive the app without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chatapp/signup", post(auth::sign_up))
        .route("/chatapp/login", post(auth::login))
        .route("/chatapp/sendmsg", post(messages::send_message))
        .route("/chatapp/{id}/getmsgs", get(messages::get_messages))
        .route("/chatapp/creategroup", post(groups::create_group))
        .route("/chatapp/addusertogroup", post(groups::add_user_to_group))
        .with_state(state)
}
