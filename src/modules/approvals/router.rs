use axum::{
    Router,
    routing::{delete, get, patch},
};

use super::controller::{approve_account, list_pending, reject_account};
use crate::state::AppState;

pub fn init_approvals_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pending))
        .route("/{id}/approve", patch(approve_account))
        .route("/{id}/reject", delete(reject_account))
}
