use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryValidator {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    pub name: String,

    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantValidator {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "address must be 1 to 255 characters"))]
    pub address: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "phone is too long"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(url(message = "website must be a URL"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRestaurantValidator {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "address must be 1 to 255 characters"))]
    pub address: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "phone is too long"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(url(message = "website must be a URL"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub category_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMenuItemValidator {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub is_vegetarian: bool,

    #[serde(default)]
    pub is_spicy: bool,

    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitReviewValidator {
    #[validate(length(min = 1, max = 100, message = "author must be 1 to 100 characters"))]
    pub author: String,

    #[validate(range(min = 1, max = 5, message = "rating must be 1 to 5"))]
    pub rating: i16,

    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_rating_must_be_one_to_five() {
        let review = |rating| SubmitReviewValidator {
            author: "小明".to_string(),
            rating,
            comment: String::new(),
        };

        assert!(review(1).validate().is_ok());
        assert!(review(5).validate().is_ok());
        assert!(review(0).validate().is_err());
        assert!(review(6).validate().is_err());
    }

    #[test]
    fn menu_item_defaults_to_available() {
        let item: CreateMenuItemValidator =
            serde_json::from_str(r#"{"name": "牛肉麵", "price": 120}"#).unwrap();
        assert!(item.is_available);
        assert!(!item.is_vegetarian);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn website_must_be_a_url() {
        let body: CreateRestaurantValidator = serde_json::from_str(
            r#"{"name": "麵屋", "address": "中壢區中大路300號", "website": "not a url"}"#,
        )
        .unwrap();
        assert!(body.validate().is_err());
    }
}
