use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Subscription;
use crate::db::entities::subscription;

#[derive(Clone)]
pub struct SubscriptionDao {
    db: DatabaseConnection,
}

impl DaoBase for SubscriptionDao {
    type Entity = Subscription;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SubscriptionDao {
    /// Edges pointing at the channel: who subscribes to it.
    pub async fn subscribers_of(&self, channel_id: &Uuid) -> DaoResult<Vec<subscription::Model>> {
        let channel_id = *channel_id;
        let mut pager = self.find_iter(None, None, move |query| {
            query.filter(subscription::Column::ChannelId.eq(channel_id))
        });
        let mut edges = Vec::new();
        while let Some(mut response) = pager.next_page().await? {
            edges.append(&mut response.data);
        }
        Ok(edges)
    }

    /// Edges originating at the account: the channels it subscribes to.
    pub async fn subscriptions_of(
        &self,
        subscriber_id: &Uuid,
    ) -> DaoResult<Vec<subscription::Model>> {
        let subscriber_id = *subscriber_id;
        let mut pager = self.find_iter(None, None, move |query| {
            query.filter(subscription::Column::SubscriberId.eq(subscriber_id))
        });
        let mut edges = Vec::new();
        while let Some(mut response) = pager.next_page().await? {
            edges.append(&mut response.data);
        }
        Ok(edges)
    }
}
