use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NutritionAdviceValidator {
    /// An empty question only returns menu suggestions.
    #[serde(default)]
    #[validate(length(max = 1000, message = "question is too long"))]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnalyzeFoodValidator {
    #[validate(length(min = 1, max = 2000, message = "description must be 1 to 2000 characters"))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFoodRecordValidator {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "calories must not be negative"))]
    pub calories: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "protein must not be negative"))]
    pub protein: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "carbs must not be negative"))]
    pub carbs: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "fat must not be negative"))]
    pub fat: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Defaults to now.
    #[serde(default)]
    pub consumed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_question_is_accepted() {
        let body: NutritionAdviceValidator = serde_json::from_str("{}").unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn negative_nutrients_are_rejected() {
        let body: CreateFoodRecordValidator =
            serde_json::from_str(r#"{"name": "便當", "calories": -10}"#).unwrap();
        assert!(body.validate().is_err());
    }
}
