pub mod client;
pub mod temp;

pub use client::{MediaClient, UploadedMedia};
pub use temp::TempUpload;
