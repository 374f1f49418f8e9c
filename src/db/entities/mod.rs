#[allow(unused_imports)]
pub mod prelude {
    pub use super::account::Entity as Account;
    pub use super::subscription::Entity as Subscription;
    pub use super::video::Entity as Video;
    pub use super::watch_entry::Entity as WatchEntry;
}

pub mod account;
pub mod subscription;
pub mod video;
pub mod watch_entry;
