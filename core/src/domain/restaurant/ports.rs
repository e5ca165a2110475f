use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    restaurant::{
        entities::{Category, MenuItem, RatingStats, Restaurant, RestaurantSummary, Review},
        value_objects::{
            CategoryMatch, CreateCategoryInput, CreateMenuItemInput, CreateRestaurantInput,
            HomeOverview, LocalMatchCriteria, MenuItemDetail, RestaurantDetail, RestaurantFilter,
            RestaurantPage, RestaurantQuery, SearchSuggestions, SubmitReviewInput,
            SubmitReviewOutput, UpdateRestaurantInput,
        },
    },
};

pub trait RestaurantService: Send + Sync {
    fn home(&self) -> impl Future<Output = Result<HomeOverview, CoreError>> + Send;

    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    fn list_restaurants(
        &self,
        filter: RestaurantFilter,
    ) -> impl Future<Output = Result<RestaurantPage, CoreError>> + Send;

    fn restaurant_detail(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<RestaurantDetail, CoreError>> + Send;

    fn submit_review(
        &self,
        input: SubmitReviewInput,
    ) -> impl Future<Output = Result<SubmitReviewOutput, CoreError>> + Send;

    fn menu_item_detail(
        &self,
        menu_item_id: Uuid,
    ) -> impl Future<Output = Result<MenuItemDetail, CoreError>> + Send;

    fn search_suggestions(
        &self,
        query: String,
    ) -> impl Future<Output = Result<SearchSuggestions, CoreError>> + Send;

    fn create_category(
        &self,
        identity: Identity,
        input: CreateCategoryInput,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn create_restaurant(
        &self,
        identity: Identity,
        input: CreateRestaurantInput,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn update_restaurant(
        &self,
        identity: Identity,
        input: UpdateRestaurantInput,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn delete_restaurant(
        &self,
        identity: Identity,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn create_menu_item(
        &self,
        identity: Identity,
        input: CreateMenuItemInput,
    ) -> impl Future<Output = Result<MenuItem, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RestaurantRepository: Send + Sync {
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    fn get_categories_by_ids(
        &self,
        category_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    fn create_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    /// Categories whose name contains `query`, with their active restaurant count.
    fn search_categories(
        &self,
        query: String,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<CategoryMatch>, CoreError>> + Send;

    fn top_rated(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<RestaurantSummary>, CoreError>> + Send;

    fn count_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn search_restaurants(
        &self,
        query: RestaurantQuery,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<RestaurantSummary>, CoreError>> + Send;

    fn get_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<Option<Restaurant>, CoreError>> + Send;

    fn find_by_name_with_coordinates(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<Restaurant>, CoreError>> + Send;

    fn match_local(
        &self,
        criteria: LocalMatchCriteria,
    ) -> impl Future<Output = Result<Vec<Restaurant>, CoreError>> + Send;

    fn create_restaurant(
        &self,
        restaurant: Restaurant,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn update_restaurant(
        &self,
        restaurant: Restaurant,
    ) -> impl Future<Output = Result<Restaurant, CoreError>> + Send;

    fn delete_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn rating_stats(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<RatingStats, CoreError>> + Send;

    fn list_reviews(
        &self,
        restaurant_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Review>, CoreError>> + Send;

    fn create_review(&self, review: Review)
    -> impl Future<Output = Result<Review, CoreError>> + Send;

    fn list_menu_items(
        &self,
        restaurant_id: Uuid,
        only_available: bool,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CoreError>> + Send;

    fn get_menu_item(
        &self,
        menu_item_id: Uuid,
    ) -> impl Future<Output = Result<Option<MenuItem>, CoreError>> + Send;

    fn list_available_menu_items(
        &self,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CoreError>> + Send;

    fn create_menu_item(
        &self,
        menu_item: MenuItem,
    ) -> impl Future<Output = Result<MenuItem, CoreError>> + Send;

    fn count_all(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
