pub mod account_service;
pub mod auth_service;
pub mod channel_service;
pub mod context;
pub mod history_service;

pub use context::ServiceContext;
