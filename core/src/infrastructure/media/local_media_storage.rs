use std::path::PathBuf;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use crate::domain::{
    common::entities::app_errors::CoreError,
    media::{entities::MediaFolder, ports::MediaStorage},
};

/// Writes uploads under `media_root/<folder>/`, named by content hash.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    media_root: PathBuf,
    public_url: String,
}

impl LocalMediaStorage {
    pub fn new(media_root: impl Into<PathBuf>, public_url: String) -> Self {
        Self {
            media_root: media_root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    fn file_name(content: &[u8], extension: &str) -> String {
        let digest = hex::encode(Sha256::digest(content));
        format!("{}.{}", &digest[..32], extension)
    }
}

impl MediaStorage for LocalMediaStorage {
    async fn save(
        &self,
        folder: MediaFolder,
        extension: String,
        content: Bytes,
    ) -> Result<String, CoreError> {
        let directory = self.media_root.join(folder.as_str());
        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            error!("Failed to create media directory {:?}: {}", directory, e);
            CoreError::InternalServerError
        })?;

        let file_name = Self::file_name(&content, &extension);
        let path = directory.join(&file_name);
        tokio::fs::write(&path, &content).await.map_err(|e| {
            error!("Failed to write media file {:?}: {}", path, e);
            CoreError::InternalServerError
        })?;

        info!(folder = %folder, file = %file_name, size = content.len(), "media stored");

        Ok(format!("{}/{}/{}", self.public_url, folder, file_name))
    }
}
