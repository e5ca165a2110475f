use bytes::Bytes;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    media::entities::{MediaFolder, StoredMedia},
};

pub trait MediaService: Send + Sync {
    fn upload_media(
        &self,
        identity: Identity,
        folder: MediaFolder,
        original_name: String,
        content: Bytes,
    ) -> impl Future<Output = Result<StoredMedia, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MediaStorage: Send + Sync {
    /// Stores the file and returns its public URL.
    fn save(
        &self,
        folder: MediaFolder,
        extension: String,
        content: Bytes,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
