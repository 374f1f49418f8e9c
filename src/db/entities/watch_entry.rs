use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// One watched video in an account's history; ordering comes from
/// `created_at` (most recent first).
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "watch_entries")]
pub struct Model {
    #[sea_orm(indexed)]
    pub account_id: Uuid,
    #[sea_orm(indexed)]
    pub video_id: Uuid,
    #[sea_orm(belongs_to, from = "account_id", to = "id", on_delete = "Cascade")]
    pub account: HasOne<super::account::Entity>,
    #[sea_orm(belongs_to, from = "video_id", to = "id", on_delete = "Cascade")]
    pub video: HasOne<super::video::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
