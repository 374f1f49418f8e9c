use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::dao::{AccountDao, SubscriptionDao},
    db::entities::account,
    error::AppError,
};

/// Derived channel read model: the account joined against the subscription
/// edge set in both directions, with the viewer's membership test.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub handle: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub subscriber_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Clone)]
pub struct ChannelService {
    account_dao: AccountDao,
    subscription_dao: SubscriptionDao,
}

impl ChannelService {
    pub fn new(account_dao: AccountDao, subscription_dao: SubscriptionDao) -> Self {
        Self {
            account_dao,
            subscription_dao,
        }
    }

    pub async fn channel_profile(
        &self,
        handle: &str,
        viewer_id: &Uuid,
    ) -> Result<ChannelProfile, AppError> {
        let handle = handle.trim().to_lowercase();
        if handle.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        let channel = self
            .account_dao
            .find_by_handle(&handle)
            .await?
            .ok_or_else(|| AppError::not_found("Channel does not exist"))?;

        let subscribers = self.subscription_dao.subscribers_of(&channel.id).await?;
        let subscribed_to = self.subscription_dao.subscriptions_of(&channel.id).await?;

        let is_subscribed = subscribers
            .iter()
            .any(|edge| edge.subscriber_id == *viewer_id);

        Ok(build_profile(
            channel,
            subscribers.len() as u64,
            subscribed_to.len() as u64,
            is_subscribed,
        ))
    }
}

fn build_profile(
    channel: account::Model,
    subscriber_count: u64,
    subscribed_to_count: u64,
    is_subscribed: bool,
) -> ChannelProfile {
    ChannelProfile {
        id: channel.id,
        handle: channel.handle,
        full_name: channel.full_name,
        email: channel.email,
        avatar_url: channel.avatar_url,
        cover_image_url: channel.cover_image_url,
        subscriber_count,
        subscribed_to_count,
        is_subscribed,
        created_at: channel.created_at,
    }
}
