use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::dao::{AccountDao, VideoDao, WatchEntryDao},
    error::AppError,
};

/// Watch-history read model: the history sequence hydrated with video
/// metadata and a trimmed owner projection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_secs: i32,
    pub views: i64,
    pub owner: VideoOwner,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOwner {
    pub full_name: String,
    pub handle: String,
    pub avatar_url: String,
}

#[derive(Clone)]
pub struct HistoryService {
    watch_entry_dao: WatchEntryDao,
    video_dao: VideoDao,
    account_dao: AccountDao,
}

impl HistoryService {
    pub fn new(
        watch_entry_dao: WatchEntryDao,
        video_dao: VideoDao,
        account_dao: AccountDao,
    ) -> Self {
        Self {
            watch_entry_dao,
            video_dao,
            account_dao,
        }
    }

    /// History order is the entry order (most recent first). Entries whose
    /// video or owner row has since disappeared are skipped rather than
    /// failing the whole read.
    pub async fn watch_history(&self, account_id: &Uuid) -> Result<Vec<WatchedVideo>, AppError> {
        let entries = self.watch_entry_dao.entries_for(account_id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let video_ids: Vec<Uuid> = entries.iter().map(|entry| entry.video_id).collect();
        let videos = self.video_dao.find_by_ids(&video_ids).await?;
        let videos: HashMap<Uuid, _> = videos.into_iter().map(|v| (v.id, v)).collect();

        let owner_ids: Vec<Uuid> = videos.values().map(|v| v.owner_id).collect();
        let owners = self.account_dao.find_by_ids(&owner_ids).await?;
        let owners: HashMap<Uuid, _> = owners.into_iter().map(|a| (a.id, a)).collect();

        let mut history = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(video) = videos.get(&entry.video_id) else {
                continue;
            };
            let Some(owner) = owners.get(&video.owner_id) else {
                continue;
            };
            history.push(WatchedVideo {
                id: video.id,
                title: video.title.clone(),
                description: video.description.clone(),
                video_url: video.video_url.clone(),
                thumbnail_url: video.thumbnail_url.clone(),
                duration_secs: video.duration_secs,
                views: video.views,
                owner: VideoOwner {
                    full_name: owner.full_name.clone(),
                    handle: owner.handle.clone(),
                    avatar_url: owner.avatar_url.clone(),
                },
            });
        }

        Ok(history)
    }
}
