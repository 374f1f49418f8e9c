use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{auth, channel, profile};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(auth::router(state.clone()))
        .merge(profile::router(state.clone()))
        .merge(channel::router(state))
}
