use chrono::NaiveDate;
use ncufoodmap_core::domain::checkin::entities::Mood;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCheckinValidator {
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 100, message = "restaurant_name must be 1 to 100 characters"))]
    pub restaurant_name: String,

    #[validate(length(min = 1, max = 100, message = "item must be 1 to 100 characters"))]
    pub item: String,

    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i32,

    #[validate(range(min = 1, max = 5, message = "rating must be 1 to 5"))]
    pub rating: i16,

    pub mood: Mood,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCheckinValidator {
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "restaurant_name must be 1 to 100 characters"))]
    pub restaurant_name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "item must be 1 to 100 characters"))]
    pub item: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "rating must be 1 to 5"))]
    pub rating: Option<i16>,

    #[serde(default)]
    pub mood: Option<Mood>,

    #[serde(default)]
    pub comment: Option<String>,

    /// Replaces the current photo.
    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkin_body_parses_mood_and_date() {
        let body: CreateCheckinValidator = serde_json::from_str(
            r#"{"date": "2025-03-14", "restaurant_name": "後門麵店", "item": "乾麵",
                "price": 60, "rating": 4, "mood": "satisfied"}"#,
        )
        .unwrap();

        assert_eq!(body.mood, Mood::Satisfied);
        assert_eq!(body.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let body: UpdateCheckinValidator = serde_json::from_str(r#"{"price": -1}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
