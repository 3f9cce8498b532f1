use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{change_password, get_me, update_profile};
use crate::state::AppState;

pub fn init_profile_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_me))
        .route("/profile", put(update_profile))
        .route("/password", post(change_password))
}
