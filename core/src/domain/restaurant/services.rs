use std::collections::HashSet;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::{
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::ports::CheckinRepository,
    common::{
        entities::app_errors::CoreError, generate_uuid_v7, ports::CacheStore, round_to,
        services::Service,
    },
    health::ports::HealthCheckRepository,
    llm::ports::LLMClient,
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::{
        entities::{Category, MenuItem, Restaurant, RestaurantConfig, Review},
        ports::{RestaurantRepository, RestaurantService},
        value_objects::{
            CreateCategoryInput, CreateMenuItemInput, CreateRestaurantInput, HOME_TOP_RESTAURANTS,
            HomeOverview, MenuItemDetail, RESTAURANTS_PER_PAGE, RestaurantDetail,
            RestaurantFilter, RestaurantPage, RestaurantQuery, SUGGESTION_CATEGORY_LIMIT,
            SUGGESTION_MIN_QUERY_CHARS, SUGGESTION_RESTAURANT_LIMIT, SearchSuggestion,
            SearchSuggestions, SubmitReviewInput, SubmitReviewOutput, UpdateRestaurantInput,
            resolve_page,
        },
    },
};

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
    Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
{
    async fn get_active_restaurant(&self, restaurant_id: Uuid) -> Result<Restaurant, CoreError> {
        self.restaurant_repository
            .get_restaurant(restaurant_id)
            .await?
            .filter(|restaurant| restaurant.is_active)
            .ok_or(CoreError::NotFound)
    }

    async fn resolve_categories(&self, mut category_ids: Vec<Uuid>) -> Result<Vec<Category>, CoreError> {
        let mut seen = HashSet::new();
        category_ids.retain(|id| seen.insert(*id));
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let requested = category_ids.len();
        let categories = self
            .restaurant_repository
            .get_categories_by_ids(category_ids)
            .await?;

        if categories.len() != requested {
            return Err(CoreError::Invalid("unknown category".to_string()));
        }

        Ok(categories)
    }
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> RestaurantService
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
    async fn home(&self) -> Result<HomeOverview, CoreError> {
        let top_restaurants = self
            .restaurant_repository
            .top_rated(HOME_TOP_RESTAURANTS)
            .await?;
        let categories = self.restaurant_repository.list_categories().await?;

        Ok(HomeOverview {
            top_restaurants,
            categories,
        })
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.restaurant_repository.list_categories().await
    }

    async fn list_restaurants(&self, filter: RestaurantFilter) -> Result<RestaurantPage, CoreError> {
        let query = RestaurantQuery::from(&filter);

        let total_count = self
            .restaurant_repository
            .count_restaurants(query.clone())
            .await?;
        let (page, total_pages) = resolve_page(filter.page, total_count, RESTAURANTS_PER_PAGE);

        let items = self
            .restaurant_repository
            .search_restaurants(query, (page - 1) * RESTAURANTS_PER_PAGE, RESTAURANTS_PER_PAGE)
            .await?;

        Ok(RestaurantPage {
            items,
            page,
            per_page: RESTAURANTS_PER_PAGE,
            total_pages,
            total_count,
        })
    }

    async fn restaurant_detail(&self, restaurant_id: Uuid) -> Result<RestaurantDetail, CoreError> {
        let restaurant = self.get_active_restaurant(restaurant_id).await?;

        let menu_items = self
            .restaurant_repository
            .list_menu_items(restaurant_id, true)
            .await?;
        let reviews = self.restaurant_repository.list_reviews(restaurant_id).await?;
        let stats = self.restaurant_repository.rating_stats(restaurant_id).await?;

        Ok(RestaurantDetail {
            restaurant,
            menu_items,
            reviews,
            avg_rating: stats.avg_rating,
            review_count: stats.review_count,
        })
    }

    async fn submit_review(&self, input: SubmitReviewInput) -> Result<SubmitReviewOutput, CoreError> {
        if !(1..=5).contains(&input.rating) {
            return Err(CoreError::Invalid(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        let author = input.author.trim().to_string();
        if author.is_empty() || author.chars().count() > 100 {
            return Err(CoreError::Invalid(
                "author must be between 1 and 100 characters".to_string(),
            ));
        }

        let restaurant = self.get_active_restaurant(input.restaurant_id).await?;

        let review = self
            .restaurant_repository
            .create_review(Review::new(restaurant.id, author, input.rating, input.comment))
            .await?;
        let stats = self.restaurant_repository.rating_stats(restaurant.id).await?;

        info!(restaurant_id = %restaurant.id, rating = review.rating, "Review submitted");

        Ok(SubmitReviewOutput {
            review,
            avg_rating: stats.avg_rating,
            review_count: stats.review_count,
        })
    }

    async fn menu_item_detail(&self, menu_item_id: Uuid) -> Result<MenuItemDetail, CoreError> {
        let menu_item = self
            .restaurant_repository
            .get_menu_item(menu_item_id)
            .await?
            .filter(|item| item.is_available)
            .ok_or(CoreError::NotFound)?;

        let restaurant = self
            .restaurant_repository
            .get_restaurant(menu_item.restaurant_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let ingredients = self
            .nutrition_repository
            .list_menu_item_ingredients(menu_item_id)
            .await?;
        let preferences = self
            .nutrition_repository
            .list_menu_item_preferences(menu_item_id)
            .await?;
        let nutrition = self
            .nutrition_repository
            .get_nutrition_info(menu_item_id)
            .await?;

        Ok(MenuItemDetail {
            menu_item,
            restaurant_name: restaurant.name,
            ingredients,
            preferences,
            nutrition,
        })
    }

    async fn search_suggestions(&self, query: String) -> Result<SearchSuggestions, CoreError> {
        let query = query.trim().to_string();
        if query.chars().count() < SUGGESTION_MIN_QUERY_CHARS {
            return Ok(SearchSuggestions {
                query,
                suggestions: Vec::new(),
            });
        }

        let restaurants = self
            .restaurant_repository
            .search_restaurants(
                RestaurantQuery {
                    name_or_address: Some(query.clone()),
                    ..Default::default()
                },
                0,
                SUGGESTION_RESTAURANT_LIMIT,
            )
            .await?;
        let categories = self
            .restaurant_repository
            .search_categories(query.clone(), SUGGESTION_CATEGORY_LIMIT)
            .await?;

        let lowered = query.to_lowercase();
        let mut suggestions: Vec<SearchSuggestion> = restaurants
            .into_iter()
            .map(|summary| {
                let restaurant = summary.restaurant;
                let (match_in, highlight_text) =
                    if restaurant.name.to_lowercase().contains(&lowered) {
                        ("name", restaurant.name.clone())
                    } else {
                        ("address", restaurant.address.clone())
                    };

                SearchSuggestion::Restaurant {
                    id: restaurant.id,
                    match_in: match_in.to_string(),
                    name: restaurant.name,
                    address: restaurant.address,
                    highlight_text,
                    avg_rating: round_to(summary.avg_rating, 1),
                    review_count: summary.review_count,
                    categories: restaurant
                        .categories
                        .into_iter()
                        .take(2)
                        .map(|c| c.name)
                        .collect(),
                    image_url: restaurant.image_url,
                }
            })
            .collect();

        suggestions.extend(categories.into_iter().map(|m| SearchSuggestion::Category {
            id: m.category.id,
            icon: m.category.icon_or_default(),
            name: m.category.name,
            restaurant_count: m.restaurant_count,
        }));

        Ok(SearchSuggestions { query, suggestions })
    }

    async fn create_category(
        &self,
        identity: Identity,
        input: CreateCategoryInput,
    ) -> Result<Category, CoreError> {
        let category = self
            .restaurant_repository
            .create_category(Category::new(input.name, input.icon))
            .await?;

        info!(user_id = %identity.id(), category_id = %category.id, "Category created");

        Ok(category)
    }

    async fn create_restaurant(
        &self,
        identity: Identity,
        input: CreateRestaurantInput,
    ) -> Result<Restaurant, CoreError> {
        let categories = self.resolve_categories(input.category_ids).await?;

        let restaurant = self
            .restaurant_repository
            .create_restaurant(Restaurant::new(RestaurantConfig {
                name: input.name,
                address: input.address,
                phone: input.phone,
                description: input.description,
                website: input.website,
                latitude: input.latitude,
                longitude: input.longitude,
                image_url: input.image_url,
                categories,
            }))
            .await?;

        info!(user_id = %identity.id(), restaurant_id = %restaurant.id, "Restaurant created");

        Ok(restaurant)
    }

    async fn update_restaurant(
        &self,
        identity: Identity,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant, CoreError> {
        let mut restaurant = self
            .restaurant_repository
            .get_restaurant(input.restaurant_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        if let Some(name) = input.name {
            restaurant.name = name;
        }
        if let Some(address) = input.address {
            restaurant.address = address;
        }
        if input.phone.is_some() {
            restaurant.phone = input.phone;
        }
        if input.description.is_some() {
            restaurant.description = input.description;
        }
        if input.website.is_some() {
            restaurant.website = input.website;
        }
        if input.latitude.is_some() {
            restaurant.latitude = input.latitude;
        }
        if input.longitude.is_some() {
            restaurant.longitude = input.longitude;
        }
        if input.image_url.is_some() {
            restaurant.image_url = input.image_url;
        }
        if let Some(is_active) = input.is_active {
            restaurant.is_active = is_active;
        }
        if let Some(category_ids) = input.category_ids {
            restaurant.categories = self.resolve_categories(category_ids).await?;
        }
        restaurant.updated_at = Utc::now();

        let restaurant = self
            .restaurant_repository
            .update_restaurant(restaurant)
            .await?;

        info!(user_id = %identity.id(), restaurant_id = %restaurant.id, "Restaurant updated");

        Ok(restaurant)
    }

    async fn delete_restaurant(
        &self,
        identity: Identity,
        restaurant_id: Uuid,
    ) -> Result<(), CoreError> {
        self.restaurant_repository
            .get_restaurant(restaurant_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.restaurant_repository
            .delete_restaurant(restaurant_id)
            .await?;

        info!(user_id = %identity.id(), restaurant_id = %restaurant_id, "Restaurant deleted");

        Ok(())
    }

    async fn create_menu_item(
        &self,
        identity: Identity,
        input: CreateMenuItemInput,
    ) -> Result<MenuItem, CoreError> {
        if input.price < 0.0 {
            return Err(CoreError::Invalid("price must not be negative".to_string()));
        }
        let restaurant = self
            .restaurant_repository
            .get_restaurant(input.restaurant_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let menu_item = self
            .restaurant_repository
            .create_menu_item(MenuItem {
                id: generate_uuid_v7(),
                restaurant_id: restaurant.id,
                name: input.name,
                description: input.description,
                price: input.price,
                image_url: input.image_url,
                is_vegetarian: input.is_vegetarian,
                is_spicy: input.is_spicy,
                is_available: input.is_available,
            })
            .await?;

        info!(user_id = %identity.id(), menu_item_id = %menu_item.id, "Menu item created");

        Ok(menu_item)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        common::{entities::app_errors::CoreError, testing::TestContext},
        restaurant::{
            ports::RestaurantService,
            value_objects::{
                CreateCategoryInput, CreateRestaurantInput, RestaurantFilter, SearchSuggestion,
                SubmitReviewInput,
            },
        },
    };

    fn new_restaurant(name: &str, category_ids: Vec<uuid::Uuid>) -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: name.to_string(),
            address: "中壢區中大路300號".to_string(),
            phone: None,
            description: None,
            website: None,
            latitude: None,
            longitude: None,
            image_url: None,
            category_ids,
        }
    }

    #[tokio::test]
    async fn repeated_category_ids_are_accepted_once() {
        let ctx = TestContext::new();
        let admin = ctx.identity("admin");
        let service = ctx.service();
        let noodles = service
            .create_category(
                admin.clone(),
                CreateCategoryInput {
                    name: "麵食".to_string(),
                    icon: None,
                },
            )
            .await
            .unwrap();

        let restaurant = service
            .create_restaurant(admin, new_restaurant("老張牛肉麵", vec![noodles.id, noodles.id]))
            .await
            .unwrap();

        assert_eq!(restaurant.categories.len(), 1);
        assert_eq!(restaurant.categories[0].id, noodles.id);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let ctx = TestContext::new();
        let admin = ctx.identity("admin");

        let result = ctx
            .service()
            .create_restaurant(admin, new_restaurant("老張牛肉麵", vec![uuid::Uuid::new_v4()]))
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn submitting_a_review_changes_the_average() {
        let ctx = TestContext::new();
        let restaurant = ctx.seed_restaurant("八方雲集", "中壢區中大路300號");
        let service = ctx.service();

        let first = service
            .submit_review(SubmitReviewInput {
                restaurant_id: restaurant.id,
                author: "小明".to_string(),
                rating: 5,
                comment: "好吃".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(first.avg_rating, 5.0);

        let second = service
            .submit_review(SubmitReviewInput {
                restaurant_id: restaurant.id,
                author: "小華".to_string(),
                rating: 2,
                comment: "普通".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(second.avg_rating, 3.5);
        assert_eq!(second.review_count, 2);

        let detail = service.restaurant_detail(restaurant.id).await.unwrap();
        assert_eq!(detail.avg_rating, 3.5);
        assert_eq!(detail.reviews.first().map(|r| r.rating), Some(2));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let ctx = TestContext::new();
        let restaurant = ctx.seed_restaurant("麥當勞", "中壢區中央路");
        let service = ctx.service();

        let result = service
            .submit_review(SubmitReviewInput {
                restaurant_id: restaurant.id,
                author: "小明".to_string(),
                rating: 6,
                comment: String::new(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn short_queries_have_no_suggestions() {
        let ctx = TestContext::new();
        ctx.seed_restaurant("八方雲集", "中壢區中大路300號");
        let service = ctx.service();

        let suggestions = service.search_suggestions(" 八 ".to_string()).await.unwrap();
        assert!(suggestions.suggestions.is_empty());
        assert_eq!(suggestions.query, "八");
    }

    #[tokio::test]
    async fn suggestions_report_where_the_query_matched() {
        let ctx = TestContext::new();
        ctx.seed_restaurant("八方雲集", "中壢區中大路300號");
        ctx.seed_restaurant("中大路鍋貼", "中壢區五興路");
        let service = ctx.service();

        let suggestions = service.search_suggestions("中大路".to_string()).await.unwrap();
        let matches: Vec<String> = suggestions
            .suggestions
            .iter()
            .filter_map(|s| match s {
                SearchSuggestion::Restaurant { match_in, .. } => Some(match_in.clone()),
                SearchSuggestion::Category { .. } => None,
            })
            .collect();

        assert_eq!(matches, vec!["address".to_string(), "name".to_string()]);
    }

    #[tokio::test]
    async fn list_clamps_page_to_last() {
        let ctx = TestContext::new();
        for i in 0..13 {
            ctx.seed_restaurant(&format!("餐廳{i}"), "中壢區");
        }
        let service = ctx.service();

        let page = service
            .list_restaurants(RestaurantFilter {
                page: Some(7),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn inactive_restaurant_is_not_found() {
        let ctx = TestContext::new();
        let restaurant = ctx.seed_restaurant("歇業小吃", "中壢區");
        ctx.deactivate_restaurant(restaurant.id);
        let service = ctx.service();

        assert_eq!(
            service.restaurant_detail(restaurant.id).await.unwrap_err(),
            CoreError::NotFound
        );
    }
}
