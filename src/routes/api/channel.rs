use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    middleware::AuthGuard,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext, channel_service::ChannelProfile, history_service::WatchedVideo,
    },
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/channel/{username}", get(channel_profile))
        .route("/history", get(watch_history))
        .with_state(state)
}

async fn channel_profile(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    Path(username): Path<String>,
) -> ApiResult<ChannelProfile> {
    let channels = ServiceContext::from_state(state.as_ref()).channel();
    let profile = channels
        .channel_profile(&username, &claims.account_id()?)
        .await?;

    JsonApiResponse::with_status(
        StatusCode::OK,
        "Channel profile fetched successfully",
        profile,
    )
}

async fn watch_history(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
) -> ApiResult<Vec<WatchedVideo>> {
    let history = ServiceContext::from_state(state.as_ref()).history();
    let videos = history.watch_history(&claims.account_id()?).await?;

    JsonApiResponse::with_status(
        StatusCode::OK,
        "Watch history fetched successfully",
        videos,
    )
}
