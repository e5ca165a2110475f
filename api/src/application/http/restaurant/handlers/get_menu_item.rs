use axum::extract::{Path, State};
use ncufoodmap_core::domain::restaurant::{ports::RestaurantService, value_objects::MenuItemDetail};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{menu_item_id}",
    tag = "restaurant",
    summary = "Get menu item",
    description = "Menu item with ingredients, dietary preference links and nutrition facts.",
    params(
        ("menu_item_id" = Uuid, Path, description = "Menu item ID"),
    ),
    responses(
        (status = 200, body = MenuItemDetail),
        (status = 404, description = "Missing or unavailable item")
    ),
)]
pub async fn get_menu_item(
    Path(menu_item_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<MenuItemDetail>, ApiError> {
    let detail = state
        .service
        .menu_item_detail(menu_item_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(detail))
}
