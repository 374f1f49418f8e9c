use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::TokenKeys,
    config::AuthConfig,
    db::dao::DaoContext,
    services::{
        account_service::AccountService, auth_service::AuthService,
        channel_service::ChannelService, history_service::HistoryService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn account(&self) -> AccountService {
        AccountService::new(self.daos.account())
    }

    pub fn auth<'a>(&self, keys: &'a TokenKeys, cfg: &'a AuthConfig) -> AuthService<'a> {
        AuthService::new(self.account(), keys, cfg)
    }

    pub fn channel(&self) -> ChannelService {
        ChannelService::new(self.daos.account(), self.daos.subscription())
    }

    pub fn history(&self) -> HistoryService {
        HistoryService::new(
            self.daos.watch_entry(),
            self.daos.video(),
            self.daos.account(),
        )
    }
}
