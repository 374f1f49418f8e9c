use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// A registered user. `refresh_token` holds the single currently honored
/// refresh token; NULL means no active session. Never serialized directly —
/// read responses go through the sanitized DTO.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(unique)]
    pub handle: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub refresh_token: Option<String>,
    #[sea_orm(has_many)]
    pub watch_entries: HasMany<super::watch_entry::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
