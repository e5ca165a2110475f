use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    nutrition::entities::{FoodPreference, Ingredient, NutritionAnalysis},
    restaurant::entities::MenuItem,
};

pub const HEALTHY_CALORIE_LIMIT: i32 = 500;
pub const DASHBOARD_HEALTHY_CHOICES: u64 = 5;
pub const PREFERENCE_SAMPLE_SIZE: u64 = 5;
pub const TOP_INGREDIENTS: u64 = 10;
pub const INGREDIENT_SAMPLE_SIZE: u64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionAverages {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthyChoice {
    pub menu_item: MenuItem,
    pub restaurant_name: String,
    pub calories: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantCalories {
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub avg_calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NutritionDashboard {
    pub averages: NutritionAverages,
    pub healthy_choices: Vec<HealthyChoice>,
    pub restaurant_calories: Vec<RestaurantCalories>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PreferenceGroup {
    pub preference: FoodPreference,
    pub items: Vec<MenuItem>,
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientUsage {
    pub ingredient: Ingredient,
    pub items: Vec<MenuItem>,
    pub item_count: i64,
    pub restaurant_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NutritionAdvice {
    pub question: String,
    pub answer: Option<String>,
    pub recommendations: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysisOutput {
    pub description: String,
    pub suggested_name: String,
    pub analysis: NutritionAnalysis,
}

pub struct CreateFoodRecordInput {
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub consumed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct FoodRecordFilter {
    pub offset: u64,
    pub limit: u64,
}
