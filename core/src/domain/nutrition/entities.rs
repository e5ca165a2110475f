use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{generate_timestamp, policies::Owned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionInfo {
    pub menu_item_id: Uuid,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreferenceKind {
    Allergy,
    Diet,
    Taste,
}

impl PreferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKind::Allergy => "ALLERGY",
            PreferenceKind::Diet => "DIET",
            PreferenceKind::Taste => "TASTE",
        }
    }
}

impl fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLERGY" => Ok(PreferenceKind::Allergy),
            "DIET" => Ok(PreferenceKind::Diet),
            "TASTE" => Ok(PreferenceKind::Taste),
            other => Err(format!("unknown preference kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FoodPreference {
    pub id: Uuid,
    pub name: String,
    pub kind: PreferenceKind,
    pub description: Option<String>,
}

/// A meal logged by a user, optionally filled from an AI analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub consumed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub struct FoodRecordConfig {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub image_url: Option<String>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl FoodRecord {
    pub fn new(config: FoodRecordConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            name: config.name,
            description: config.description,
            calories: config.calories,
            protein: config.protein,
            carbs: config.carbs,
            fat: config.fat,
            image_url: config.image_url,
            consumed_at: config.consumed_at.unwrap_or(now),
            created_at: now,
        }
    }
}

impl Owned for FoodRecord {
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

/// Structured reading of a free-text nutrition analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionAnalysis {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub nutritional_value: Option<String>,
    pub health_impact: Option<String>,
    pub improvement_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NutritionAnalysis {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
            && self.nutritional_value.is_none()
            && self.health_impact.is_none()
            && self.improvement_suggestions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_kind_round_trips_through_db_string() {
        for kind in [
            PreferenceKind::Allergy,
            PreferenceKind::Diet,
            PreferenceKind::Taste,
        ] {
            assert_eq!(kind.as_str().parse::<PreferenceKind>(), Ok(kind));
        }
        assert!("SPICY".parse::<PreferenceKind>().is_err());
    }
}
