use axum::{Router, routing::post};

use super::controller::create_account;
use crate::state::AppState;

pub fn init_accounts_router() -> Router<AppState> {
    Router::new().route("/", post(create_account))
}
