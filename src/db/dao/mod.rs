pub mod account_dao;
pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod subscription_dao;
pub mod video_dao;
pub mod watch_entry_dao;

pub use account_dao::AccountDao;
pub use base::{DaoBase, DaoPager, PaginatedResponse};
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use subscription_dao::SubscriptionDao;
pub use video_dao::VideoDao;
pub use watch_entry_dao::WatchEntryDao;
