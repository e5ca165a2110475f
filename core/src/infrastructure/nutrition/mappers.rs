use sea_orm::{FromQueryResult, QueryResult};
use tracing::warn;

use crate::{
    domain::{
        nutrition::entities::{FoodPreference, FoodRecord, Ingredient, NutritionInfo},
        restaurant::entities::MenuItem,
    },
    entity::{food_preferences, food_records, ingredients, menu_items, nutrition_info},
};

impl From<nutrition_info::Model> for NutritionInfo {
    fn from(model: nutrition_info::Model) -> Self {
        Self {
            menu_item_id: model.menu_item_id,
            calories: model.calories,
            protein: model.protein,
            carbs: model.carbs,
            fat: model.fat,
            fiber: model.fiber,
            sugar: model.sugar,
            sodium: model.sodium,
        }
    }
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<food_records::Model> for FoodRecord {
    fn from(model: food_records::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            calories: model.calories,
            protein: model.protein,
            carbs: model.carbs,
            fat: model.fat,
            image_url: model.image_url,
            consumed_at: model.consumed_at.to_utc(),
            created_at: model.created_at.to_utc(),
        }
    }
}

/// Rows with an unknown kind are skipped rather than failing the whole query.
pub fn preference_from_model(model: food_preferences::Model) -> Option<FoodPreference> {
    match model.kind.parse() {
        Ok(kind) => Some(FoodPreference {
            id: model.id,
            name: model.name,
            kind,
            description: model.description,
        }),
        Err(e) => {
            warn!(preference_id = %model.id, "skipping food preference: {}", e);
            None
        }
    }
}

/// Reads a `menu_items` row selected with `m.*`.
pub fn menu_item_from_row(row: &QueryResult) -> Option<MenuItem> {
    menu_items::Model::from_query_result(row, "")
        .ok()
        .map(MenuItem::from)
}
