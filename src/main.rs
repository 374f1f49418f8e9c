use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, middleware};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use clipstream::{
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    media::MediaClient,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().expect("failed to load config");
    init_tracing(&cfg.logging.rust_log);

    let db_cfg = cfg.database.clone().context("database config is required")?;
    let auth_cfg = cfg.auth.clone().context("auth config is required")?;
    let media_cfg = cfg.media.clone().context("media config is required")?;

    let db = connection::connect(&db_cfg).await?;
    let media = MediaClient::new(&media_cfg);
    let state = AppState::new(cfg, auth_cfg, db, media);

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!(
        "{}:{}",
        state.config.general.host.as_str(),
        state.config.general.port
    )
    .parse()
    .expect("invalid host/port");
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
