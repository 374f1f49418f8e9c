use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// Directed edge: `subscriber_id` follows `channel_id`. Written by the
/// subscription subsystem; this service only reads it.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(indexed)]
    pub subscriber_id: Uuid,
    #[sea_orm(indexed)]
    pub channel_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}
