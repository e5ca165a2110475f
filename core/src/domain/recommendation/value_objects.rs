use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    llm::parsing::string_list,
    recommendation::entities::{MatchedRestaurant, errors::RecommendationError},
};

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const PHOTO_MAX_WIDTH: u32 = 400;
pub const LOCAL_MATCH_THRESHOLD: usize = 3;
pub const MAX_REMOTE_MATCHES: usize = 10;
pub const HISTORY_DEFAULT_LIMIT: u64 = 20;

/// What the model suggested for a recommendation query.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSuggestion {
    pub store_type: String,
    pub analysis: String,
}

impl StoreSuggestion {
    /// Parses the cleaned completion. Both keys must be present.
    pub fn parse(text: &str) -> Result<Self, RecommendationError> {
        let value: Value =
            serde_json::from_str(text).map_err(|_| RecommendationError::MalformedAiResponse)?;
        let object = value
            .as_object()
            .ok_or(RecommendationError::IncompleteAiResponse)?;

        let field = |key: &str| -> Result<String, RecommendationError> {
            match object.get(key) {
                Some(Value::String(s)) => Ok(s.trim().to_string()),
                Some(other) if !other.is_null() => Ok(other.to_string()),
                _ => Err(RecommendationError::IncompleteAiResponse),
            }
        };

        Ok(Self {
            store_type: field("store_type")?,
            analysis: field("analysis")?,
        })
    }
}

/// Keywords the matcher model extracted from a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatcherAnalysis {
    pub cuisine_type: String,
    pub specific_foods: Vec<String>,
    pub price_range: String,
    pub dietary_requirements: Vec<String>,
    pub dining_experience: Vec<String>,
    pub search_keywords: Vec<String>,
}

impl MatcherAnalysis {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let list = |key: &str| value.get(key).map(string_list).unwrap_or_default();

        Self {
            cuisine_type: text("cuisine_type"),
            specific_foods: list("specific_foods"),
            price_range: text("price_range"),
            dietary_requirements: list("dietary_requirements"),
            dining_experience: list("dining_experience"),
            search_keywords: list("search_keywords"),
        }
    }

    /// Keyword for the remote search: first search keyword, else the cuisine, else the first food.
    pub fn remote_keyword(&self) -> Option<String> {
        self.search_keywords
            .first()
            .cloned()
            .or_else(|| (!self.cuisine_type.is_empty()).then(|| self.cuisine_type.clone()))
            .or_else(|| self.specific_foods.first().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchOutput {
    pub query: String,
    pub analysis: Option<MatcherAnalysis>,
    pub error: Option<String>,
    pub results: Vec<MatchedRestaurant>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn suggestion_requires_both_keys() {
        let parsed = StoreSuggestion::parse(r#"{"store_type": "拉麵", "analysis": "暖胃"}"#).unwrap();
        assert_eq!(parsed.store_type, "拉麵");

        assert_eq!(
            StoreSuggestion::parse(r#"{"store_type": "拉麵"}"#),
            Err(RecommendationError::IncompleteAiResponse)
        );
        assert_eq!(
            StoreSuggestion::parse("[1, 2]"),
            Err(RecommendationError::IncompleteAiResponse)
        );
        assert_eq!(
            StoreSuggestion::parse("我推薦拉麵"),
            Err(RecommendationError::MalformedAiResponse)
        );
    }

    #[test]
    fn remote_keyword_falls_back_in_order() {
        let cases = [
            (json!({"search_keywords": ["火鍋"], "cuisine_type": "中式"}), Some("火鍋")),
            (json!({"search_keywords": [], "cuisine_type": "中式"}), Some("中式")),
            (json!({"cuisine_type": "", "specific_foods": ["牛排"]}), Some("牛排")),
            (json!({}), None),
        ];

        for (value, expected) in cases {
            let analysis = MatcherAnalysis::from_value(&value);
            assert_eq!(analysis.remote_keyword().as_deref(), expected);
        }
    }
}
