use axum::extract::{Multipart, Path, State};
use ncufoodmap_core::domain::media::{
    entities::{MediaFolder, StoredMedia},
    ports::MediaService,
};
use tracing::error;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{folder}",
    tag = "media",
    summary = "Upload an image",
    description = "Stores the multipart field `file` under the folder and returns its public URL. Accepts jpg, jpeg, png, gif and webp up to 10 MB.",
    params(
        ("folder" = MediaFolder, Path, description = "restaurant_images, menu_item_images, checkin_photos or food_records"),
    ),
    responses(
        (status = 201, body = StoredMedia),
        (status = 400, description = "Missing file or unknown folder"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Unsupported file type")
    ),
)]
pub async fn upload_media(
    Path(folder): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    mut multipart: Multipart,
) -> Result<Response<StoredMedia>, ApiError> {
    let folder = folder.parse::<MediaFolder>().map_err(ApiError::from)?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Missing filename in file field".to_string()))?;

        let content = field.bytes().await.map_err(|e| {
            error!("Failed to read file bytes: {}", e);
            ApiError::BadRequest(format!("Failed to read file: {}", e))
        })?;

        if content.is_empty() {
            return Err(ApiError::BadRequest("File cannot be empty".to_string()));
        }

        let stored = state
            .service
            .upload_media(identity, folder, file_name, content)
            .await
            .map_err(ApiError::from)?;

        return Ok(Response::Created(stored));
    }

    Err(ApiError::BadRequest(
        "Missing 'file' field in multipart form".to_string(),
    ))
}
