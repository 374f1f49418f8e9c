use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// Published video metadata, owned by the video subsystem; read here to
/// hydrate watch-history rows.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_secs: i32,
    #[sea_orm(default_value = 0)]
    pub views: i64,
    #[sea_orm(default_value = true)]
    pub is_published: bool,
    #[sea_orm(indexed)]
    pub owner_id: Uuid,
    #[sea_orm(has_many)]
    pub watch_entries: HasMany<super::watch_entry::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
