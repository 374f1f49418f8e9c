use sea_orm::DatabaseConnection;

use super::{AccountDao, DaoBase, SubscriptionDao, VideoDao, WatchEntryDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn account(&self) -> AccountDao {
        DaoBase::new(&self.db)
    }

    pub fn subscription(&self) -> SubscriptionDao {
        DaoBase::new(&self.db)
    }

    pub fn video(&self) -> VideoDao {
        DaoBase::new(&self.db)
    }

    pub fn watch_entry(&self) -> WatchEntryDao {
        DaoBase::new(&self.db)
    }
}
