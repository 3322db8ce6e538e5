pub mod download;
pub mod health;
pub mod text_upload;
pub mod video_upload;
