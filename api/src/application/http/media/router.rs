use super::handlers::upload_media::{__path_upload_media, upload_media};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use ncufoodmap_core::domain::media::entities::MAX_UPLOAD_BYTES;
use utoipa::OpenApi;

/// Room for the multipart framing around a maximum size file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(upload_media))]
pub struct MediaApiDoc;

pub fn media_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/uploads/{{folder}}", state.args.server.root_path),
            post(upload_media),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
