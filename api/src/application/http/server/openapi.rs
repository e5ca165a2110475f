use crate::application::http::{
    article::router::ArticleApiDoc,
    authentication::router::AuthenticationApiDoc,
    checkin::router::{CheckinApiDoc, RankingApiDoc},
    health::router::HealthApiDoc,
    media::router::MediaApiDoc,
    nutrition::router::{FoodRecordApiDoc, NutritionApiDoc},
    recommendation::router::RecommendationApiDoc,
    restaurant::router::{CategoryApiDoc, MenuItemApiDoc, RestaurantApiDoc, SearchApiDoc},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NCU Food Map API"
    ),
    modifiers(&BearerAuth),
    security(("bearer" = [])),
    nest(
        (path = "/auth", api = AuthenticationApiDoc),
        (path = "/restaurants", api = RestaurantApiDoc),
        (path = "/categories", api = CategoryApiDoc),
        (path = "/menu-items", api = MenuItemApiDoc),
        (path = "/search", api = SearchApiDoc),
        (path = "/nutrition", api = NutritionApiDoc),
        (path = "/food-records", api = FoodRecordApiDoc),
        (path = "/checkins", api = CheckinApiDoc),
        (path = "/rankings", api = RankingApiDoc),
        (path = "/articles", api = ArticleApiDoc),
        (path = "/recommendations", api = RecommendationApiDoc),
        (path = "/uploads", api = MediaApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
