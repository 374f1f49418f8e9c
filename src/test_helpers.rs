use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tower_cookies::CookieManagerLayer;

use crate::{
    config::{AppConfig, AuthConfig, MediaConfig},
    media::MediaClient,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        access_token_secret: "test-access-secret".to_string(),
        refresh_token_secret: "test-refresh-secret".to_string(),
        access_ttl_secs: 900,
        refresh_ttl_days: 30,
    }
}

// Points at a closed port so a test that accidentally reaches for the media
// host fails fast instead of hitting the network.
pub fn test_media_config() -> MediaConfig {
    MediaConfig {
        base_url: "http://127.0.0.1:9/media".to_string(),
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
    }
}

pub fn test_state(db: DatabaseConnection) -> Arc<AppState> {
    AppState::new(
        AppConfig::default(),
        test_auth_config(),
        db,
        MediaClient::new(&test_media_config()),
    )
}

/// Router with the same middleware stack the server runs (minus tracing),
/// over the given connection.
pub fn test_router(db: DatabaseConnection) -> Router {
    let state = test_state(db);
    Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(axum::middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(CookieManagerLayer::new())
}

/// Router over an empty mock database; enough for routes that reject before
/// touching the store.
pub fn mock_router() -> Router {
    test_router(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}
