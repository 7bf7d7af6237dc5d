pub mod application;
pub mod common;
pub mod event;
pub mod upload_file;
pub mod user;

pub use upload_file::UploadedFileCreate;
