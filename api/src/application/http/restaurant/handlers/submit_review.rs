use axum::extract::{Path, State};
use ncufoodmap_core::domain::restaurant::{
    ports::RestaurantService,
    value_objects::{SubmitReviewInput, SubmitReviewOutput},
};
use uuid::Uuid;

use crate::application::http::{
    restaurant::validators::SubmitReviewValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{restaurant_id}/reviews",
    tag = "restaurant",
    summary = "Submit review",
    description = "Adds a review and returns it with the restaurant's new average rating.",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 201, body = SubmitReviewOutput),
        (status = 400, description = "Invalid rating or author"),
        (status = 404, description = "Missing or inactive restaurant")
    ),
    request_body = SubmitReviewValidator
)]
pub async fn submit_review(
    Path(restaurant_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SubmitReviewValidator>,
) -> Result<Response<SubmitReviewOutput>, ApiError> {
    let output = state
        .service
        .submit_review(SubmitReviewInput {
            restaurant_id,
            author: payload.author,
            rating: payload.rating,
            comment: payload.comment,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(output))
}
