use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    nutrition::entities::{FoodPreference, Ingredient, NutritionInfo},
    restaurant::entities::{Category, MenuItem, Restaurant, RestaurantSummary, Review},
};

pub const RESTAURANTS_PER_PAGE: u64 = 12;
pub const HOME_TOP_RESTAURANTS: u64 = 5;
pub const SUGGESTION_RESTAURANT_LIMIT: u64 = 8;
pub const SUGGESTION_CATEGORY_LIMIT: u64 = 3;
pub const SUGGESTION_MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub category_id: Option<Uuid>,
    pub min_rating: Option<f64>,
    pub name_or_address: Option<String>,
    pub page: Option<u64>,
}

/// Filter as understood by the repository, after paging is resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantQuery {
    pub category_id: Option<Uuid>,
    pub min_rating: Option<f64>,
    pub name_or_address: Option<String>,
}

impl From<&RestaurantFilter> for RestaurantQuery {
    fn from(filter: &RestaurantFilter) -> Self {
        Self {
            category_id: filter.category_id,
            min_rating: filter.min_rating,
            name_or_address: filter
                .name_or_address
                .as_ref()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPage {
    pub items: Vec<RestaurantSummary>,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

/// Clamps a requested page into `1..=total_pages`; an empty result still has one page.
pub fn resolve_page(requested: Option<u64>, total_count: u64, per_page: u64) -> (u64, u64) {
    let total_pages = total_count.div_ceil(per_page).max(1);
    let page = requested.unwrap_or(1).clamp(1, total_pages);
    (page, total_pages)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeOverview {
    pub top_restaurants: Vec<RestaurantSummary>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub menu_items: Vec<MenuItem>,
    pub reviews: Vec<Review>,
    pub avg_rating: f64,
    pub review_count: i64,
}

pub struct SubmitReviewInput {
    pub restaurant_id: Uuid,
    pub author: String,
    pub rating: i16,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewOutput {
    pub review: Review,
    pub avg_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItemIngredient {
    pub ingredient: Ingredient,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItemPreference {
    pub preference: FoodPreference,
    pub is_compatible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItemDetail {
    pub menu_item: MenuItem,
    pub restaurant_name: String,
    pub ingredients: Vec<MenuItemIngredient>,
    pub preferences: Vec<MenuItemPreference>,
    pub nutrition: Option<NutritionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchSuggestion {
    Restaurant {
        id: Uuid,
        match_in: String,
        name: String,
        address: String,
        highlight_text: String,
        avg_rating: f64,
        review_count: i64,
        categories: Vec<String>,
        image_url: Option<String>,
    },
    Category {
        id: Uuid,
        name: String,
        restaurant_count: i64,
        icon: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchSuggestions {
    pub query: String,
    pub suggestions: Vec<SearchSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryMatch {
    pub category: Category,
    pub restaurant_count: i64,
}

pub struct CreateCategoryInput {
    pub name: String,
    pub icon: Option<String>,
}

pub struct CreateRestaurantInput {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub category_ids: Vec<Uuid>,
}

pub struct UpdateRestaurantInput {
    pub restaurant_id: Uuid,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub category_ids: Option<Vec<Uuid>>,
}

pub struct CreateMenuItemInput {
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub is_available: bool,
}

/// Criteria extracted by the LLM for matching local restaurants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalMatchCriteria {
    pub cuisine_type: Option<String>,
    pub specific_foods: Vec<String>,
    pub search_keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(resolve_page(None, 30, 12), (1, 3));
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        assert_eq!(resolve_page(Some(9), 30, 12), (3, 3));
        assert_eq!(resolve_page(Some(0), 30, 12), (1, 3));
    }

    #[test]
    fn empty_result_has_a_single_page() {
        assert_eq!(resolve_page(Some(4), 0, 12), (1, 1));
    }

    #[test]
    fn blank_search_text_is_ignored() {
        let filter = RestaurantFilter {
            name_or_address: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(RestaurantQuery::from(&filter).name_or_address, None);
    }
}
