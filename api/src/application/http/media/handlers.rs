pub mod upload_media;
