use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{generate_timestamp, round_to};

pub const DEFAULT_CATEGORY_ICON: &str = "fas fa-utensils";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

impl Category {
    pub fn new(name: String, icon: Option<String>) -> Self {
        let (_, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            name,
            icon,
        }
    }

    pub fn icon_or_default(&self) -> String {
        self.icon
            .clone()
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct RestaurantConfig {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub categories: Vec<Category>,
}

impl Restaurant {
    pub fn new(config: RestaurantConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            name: config.name,
            address: config.address,
            phone: config.phone,
            description: config.description,
            website: config.website,
            latitude: config.latitude,
            longitude: config.longitude,
            image_url: config.image_url,
            is_active: true,
            categories: config.categories,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub is_available: bool,
}

impl MenuItem {
    /// Case-insensitive match against name or description.
    pub fn mentions(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.name.to_lowercase().contains(&word)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&word))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub author: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(restaurant_id: Uuid, author: String, rating: i16, comment: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            restaurant_id,
            author,
            rating,
            comment,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RatingStats {
    pub avg_rating: f64,
    pub review_count: i64,
}

impl RatingStats {
    pub fn from_ratings(ratings: &[i16]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }
        let total: i64 = ratings.iter().map(|r| *r as i64).sum();

        Self {
            avg_rating: total as f64 / ratings.len() as f64,
            review_count: ratings.len() as i64,
        }
    }

    pub fn rounded(&self) -> f64 {
        round_to(self.avg_rating, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantSummary {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub avg_rating: f64,
    pub review_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_stats_average_reviews() {
        let stats = RatingStats::from_ratings(&[5, 4, 4]);
        assert_eq!(stats.review_count, 3);
        assert_eq!(stats.rounded(), 4.3);
    }

    #[test]
    fn rating_stats_without_reviews_is_zero() {
        let stats = RatingStats::from_ratings(&[]);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.review_count, 0);
    }

    #[test]
    fn category_icon_falls_back_to_default() {
        let category = Category::new("日式".to_string(), None);
        assert_eq!(category.icon_or_default(), DEFAULT_CATEGORY_ICON);

        let category = Category::new("咖啡".to_string(), Some("fas fa-mug-hot".to_string()));
        assert_eq!(category.icon_or_default(), "fas fa-mug-hot");
    }

    #[test]
    fn menu_item_mentions_checks_description() {
        let item = MenuItem {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            name: "招牌便當".to_string(),
            description: Some("雞胸肉搭配蔬菜".to_string()),
            price: 120.0,
            image_url: None,
            is_vegetarian: false,
            is_spicy: false,
            is_available: true,
        };
        assert!(item.mentions("雞胸"));
        assert!(!item.mentions("牛肉"));
    }
}
