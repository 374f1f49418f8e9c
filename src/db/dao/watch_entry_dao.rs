use sea_orm::{ColumnTrait, DatabaseConnection, Order, QueryFilter};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::WatchEntry;
use crate::db::entities::watch_entry;

#[derive(Clone)]
pub struct WatchEntryDao {
    db: DatabaseConnection,
}

impl DaoBase for WatchEntryDao {
    type Entity = WatchEntry;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl WatchEntryDao {
    /// The account's watch history, most recently watched first.
    pub async fn entries_for(&self, account_id: &Uuid) -> DaoResult<Vec<watch_entry::Model>> {
        let account_id = *account_id;
        let mut pager = self.find_iter(
            None,
            Some((watch_entry::Column::CreatedAt, Order::Desc)),
            move |query| query.filter(watch_entry::Column::AccountId.eq(account_id)),
        );
        let mut entries = Vec::new();
        while let Some(mut response) = pager.next_page().await? {
            entries.append(&mut response.data);
        }
        Ok(entries)
    }
}
