pub mod auth;
pub mod channel;
pub mod dto;
pub mod profile;
mod router;
pub mod uploads;

pub use dto::AccountResponse;
pub use router::router;
