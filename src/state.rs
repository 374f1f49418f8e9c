use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::TokenKeys,
    config::{AppConfig, AuthConfig},
    media::MediaClient,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth: AuthConfig,
    pub keys: TokenKeys,
    pub db: DatabaseConnection,
    pub media: MediaClient,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        auth: AuthConfig,
        db: DatabaseConnection,
        media: MediaClient,
    ) -> Arc<Self> {
        let keys = TokenKeys::from_config(&auth);
        Arc::new(Self {
            config,
            auth,
            keys,
            db,
            media,
        })
    }
}
