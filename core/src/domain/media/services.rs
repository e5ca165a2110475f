use bytes::Bytes;
use tracing::info;

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::{
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::ports::CheckinRepository,
    common::{entities::app_errors::CoreError, ports::CacheStore, services::Service},
    health::ports::HealthCheckRepository,
    llm::ports::LLMClient,
    media::{
        entities::{MAX_UPLOAD_BYTES, MediaFolder, StoredMedia, image_extension},
        ports::{MediaService, MediaStorage},
    },
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> MediaService
    for Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    NU: NutritionRepository,
    CK: CheckinRepository,
    AR: ArticleRepository,
    RC: RecommendationRepository,
    U: UserRepository,
    SS: SessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    PL: PlacesClient,
    MS: MediaStorage,
    OA: OAuthProvider,
    CS: CacheStore,
{
    async fn upload_media(
        &self,
        identity: Identity,
        folder: MediaFolder,
        original_name: String,
        content: Bytes,
    ) -> Result<StoredMedia, CoreError> {
        if content.is_empty() {
            return Err(CoreError::Invalid("empty file".to_string()));
        }
        if content.len() > MAX_UPLOAD_BYTES {
            return Err(CoreError::FileTooLarge);
        }
        let extension = image_extension(&original_name)?;

        let size = content.len();
        let url = self.media_storage.save(folder, extension, content).await?;
        info!(user = %identity.username(), folder = %folder, size, url = %url, "Media stored");

        Ok(StoredMedia { url })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::domain::{
        common::{entities::app_errors::CoreError, testing::TestContext},
        media::{entities::MediaFolder, ports::MediaService},
    };

    #[tokio::test]
    async fn accepted_upload_returns_public_url() {
        let ctx = TestContext::new();

        let stored = ctx
            .service()
            .upload_media(
                ctx.identity("uploader"),
                MediaFolder::CheckinPhotos,
                "lunch.PNG".to_string(),
                Bytes::from_static(b"\x89PNG"),
            )
            .await
            .unwrap();

        assert!(stored.url.starts_with("/media/checkin_photos/"));
        assert!(stored.url.ends_with(".png"));
    }

    #[tokio::test]
    async fn oversized_and_foreign_files_are_rejected() {
        let ctx = TestContext::new();
        let service = ctx.service();

        let too_big = Bytes::from(vec![0u8; 10 * 1024 * 1024 + 1]);
        assert_eq!(
            service
                .upload_media(
                    ctx.identity("u"),
                    MediaFolder::FoodRecords,
                    "big.jpg".to_string(),
                    too_big,
                )
                .await
                .unwrap_err(),
            CoreError::FileTooLarge
        );

        assert!(matches!(
            service
                .upload_media(
                    ctx.identity("u"),
                    MediaFolder::FoodRecords,
                    "script.sh".to_string(),
                    Bytes::from_static(b"echo"),
                )
                .await,
            Err(CoreError::UnsupportedFileType(_))
        ));
    }
}
