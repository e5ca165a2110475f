use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    nutrition::{
        entities::{FoodRecord, NutritionInfo, PreferenceKind},
        value_objects::{
            CreateFoodRecordInput, FoodAnalysisOutput, FoodRecordFilter, HealthyChoice,
            IngredientUsage, NutritionAdvice, NutritionAverages, NutritionDashboard,
            PreferenceGroup, RestaurantCalories,
        },
    },
    restaurant::value_objects::{MenuItemIngredient, MenuItemPreference},
};

pub trait NutritionService: Send + Sync {
    fn dashboard(&self) -> impl Future<Output = Result<NutritionDashboard, CoreError>> + Send;

    fn dietary_preferences(
        &self,
    ) -> impl Future<Output = Result<Vec<PreferenceGroup>, CoreError>> + Send;

    fn allergen_info(&self) -> impl Future<Output = Result<Vec<PreferenceGroup>, CoreError>> + Send;

    fn ingredient_analysis(
        &self,
    ) -> impl Future<Output = Result<Vec<IngredientUsage>, CoreError>> + Send;

    fn nutrition_advice(
        &self,
        question: String,
    ) -> impl Future<Output = Result<NutritionAdvice, CoreError>> + Send;

    fn analyze_food(
        &self,
        identity: Identity,
        description: String,
    ) -> impl Future<Output = Result<FoodAnalysisOutput, CoreError>> + Send;

    fn create_food_record(
        &self,
        identity: Identity,
        input: CreateFoodRecordInput,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;

    fn list_food_records(
        &self,
        identity: Identity,
        filter: FoodRecordFilter,
    ) -> impl Future<Output = Result<Vec<FoodRecord>, CoreError>> + Send;

    fn delete_food_record(
        &self,
        identity: Identity,
        record_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait NutritionRepository: Send + Sync {
    fn averages(&self) -> impl Future<Output = Result<NutritionAverages, CoreError>> + Send;

    /// Available items under `max_calories`, lowest first.
    fn healthy_choices(
        &self,
        max_calories: i32,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<HealthyChoice>, CoreError>> + Send;

    fn restaurant_calories(
        &self,
    ) -> impl Future<Output = Result<Vec<RestaurantCalories>, CoreError>> + Send;

    /// One group per preference of `kind`, sampling items with the given compatibility.
    fn preference_groups(
        &self,
        kind: PreferenceKind,
        compatible: bool,
        sample_size: u64,
    ) -> impl Future<Output = Result<Vec<PreferenceGroup>, CoreError>> + Send;

    fn top_ingredients(
        &self,
        limit: u64,
        sample_size: u64,
    ) -> impl Future<Output = Result<Vec<IngredientUsage>, CoreError>> + Send;

    fn get_nutrition_info(
        &self,
        menu_item_id: Uuid,
    ) -> impl Future<Output = Result<Option<NutritionInfo>, CoreError>> + Send;

    fn list_menu_item_ingredients(
        &self,
        menu_item_id: Uuid,
    ) -> impl Future<Output = Result<Vec<MenuItemIngredient>, CoreError>> + Send;

    fn list_menu_item_preferences(
        &self,
        menu_item_id: Uuid,
    ) -> impl Future<Output = Result<Vec<MenuItemPreference>, CoreError>> + Send;

    fn create_food_record(
        &self,
        record: FoodRecord,
    ) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;

    fn list_food_records(
        &self,
        user_id: Uuid,
        filter: FoodRecordFilter,
    ) -> impl Future<Output = Result<Vec<FoodRecord>, CoreError>> + Send;

    fn get_food_record(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<Option<FoodRecord>, CoreError>> + Send;

    fn delete_food_record(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
