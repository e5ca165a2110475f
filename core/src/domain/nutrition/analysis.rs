use std::sync::LazyLock;

use rand::{Rng, seq::SliceRandom};
use regex::Regex;
use serde_json::Value;

use crate::domain::{
    llm::parsing::{extract_json_object, lenient_number},
    nutrition::entities::NutritionAnalysis,
    restaurant::entities::MenuItem,
};

pub const UNPARSEABLE_ANALYSIS: &str = "無法解析結構化數據";
pub const MAX_RECORD_NAME_CHARS: usize = 50;
pub const MENU_RECOMMENDATION_COUNT: usize = 3;

/// Topic keyword in the question, then menu words that fit it.
pub const ADVICE_KEYWORDS: &[(&str, &[&str])] = &[
    ("減肥", &["低卡", "低熱量", "健康", "蔬菜", "輕食"]),
    ("蛋白質", &["肉", "雞胸", "牛肉", "魚", "蛋", "豆腐", "奶製品"]),
    ("素食", &["素", "蔬菜", "豆腐", "沙拉"]),
    ("糖尿病", &["低糖", "低碳水", "全穀物"]),
    ("高血壓", &["低鈉", "低鹽", "地中海"]),
];

fn number_patterns(labels: &[&str]) -> Vec<Regex> {
    labels
        .iter()
        .filter_map(|label| Regex::new(&format!(r"(?i){label}.*?(\d+)")).ok())
        .collect()
}

static CALORIES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| number_patterns(&["熱量", "卡路里", "calories"]));
static PROTEIN: LazyLock<Vec<Regex>> = LazyLock::new(|| number_patterns(&["蛋白質", "protein"]));
static CARBS: LazyLock<Vec<Regex>> = LazyLock::new(|| number_patterns(&["碳水化合物", "carbs"]));
static FAT: LazyLock<Vec<Regex>> = LazyLock::new(|| number_patterns(&["脂肪", "fat"]));

#[derive(Clone, Copy, PartialEq)]
enum Section {
    NutritionalValue,
    HealthImpact,
    Suggestions,
}

const SECTION_TITLES: &[(&str, Section)] = &[
    ("營養價值", Section::NutritionalValue),
    ("健康影響", Section::HealthImpact),
    ("改善建議", Section::Suggestions),
];

fn first_number(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Splits a suggestion blob by line, or by comma when it is a single line.
pub fn split_suggestions(text: &str) -> Vec<String> {
    let parts: Vec<&str> = if text.contains('\n') {
        text.split('\n').collect()
    } else {
        text.split([',', '，']).collect()
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn store_section(analysis: &mut NutritionAnalysis, section: Section, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    match section {
        Section::NutritionalValue => analysis.nutritional_value = Some(lines.join("\n")),
        Section::HealthImpact => analysis.health_impact = Some(lines.join("\n")),
        Section::Suggestions => analysis.improvement_suggestions = lines.to_vec(),
    }
}

/// Regex extraction for answers that ignored the requested JSON format.
pub fn extract_fields_from_text(text: &str) -> NutritionAnalysis {
    let mut analysis = NutritionAnalysis {
        calories: first_number(&CALORIES, text),
        protein: first_number(&PROTEIN, text),
        carbs: first_number(&CARBS, text),
        fat: first_number(&FAT, text),
        ..Default::default()
    };

    let mut current: Option<Section> = None;
    let mut content: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some((_, section)) = SECTION_TITLES.iter().find(|(title, _)| line.contains(title)) {
            if let Some(previous) = current {
                store_section(&mut analysis, previous, &content);
            }
            current = Some(*section);
            content.clear();
            continue;
        }
        if current.is_some() && !line.trim().is_empty() {
            content.push(line.trim().to_string());
        }
    }
    if let Some(last) = current {
        store_section(&mut analysis, last, &content);
    }

    if analysis.is_empty() {
        analysis.text_response = Some(text.to_string());
        analysis.error = Some(UNPARSEABLE_ANALYSIS.to_string());
    }

    analysis
}

fn analysis_from_json(object: &Value) -> NutritionAnalysis {
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let improvement_suggestions = match object.get("improvement_suggestions") {
        Some(Value::String(s)) => split_suggestions(s),
        Some(value) => crate::domain::llm::parsing::string_list(value),
        None => Vec::new(),
    };

    NutritionAnalysis {
        calories: object.get("calories").and_then(lenient_number),
        protein: object.get("protein").and_then(lenient_number),
        carbs: object.get("carbs").and_then(lenient_number),
        fat: object.get("fat").and_then(lenient_number),
        nutritional_value: text("nutritional_value"),
        health_impact: text("health_impact"),
        improvement_suggestions,
        text_response: None,
        error: None,
    }
}

/// Reads the model's answer: embedded JSON first, then labelled text.
pub fn parse_food_analysis(text: &str) -> NutritionAnalysis {
    extract_json_object(text)
        .map(|object| analysis_from_json(&object))
        .filter(|analysis| !analysis.is_empty())
        .unwrap_or_else(|| extract_fields_from_text(text))
}

/// Name for a record created from a description such as "雞腿便當、味噌湯".
pub fn suggested_record_name(description: &str) -> String {
    let first = description
        .split('、')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| description.trim());

    if first.chars().count() > MAX_RECORD_NAME_CHARS {
        let truncated: String = first.chars().take(MAX_RECORD_NAME_CHARS - 3).collect();
        format!("{truncated}...")
    } else {
        first.to_string()
    }
}

/// Picks up to three available items that fit the topics in `question`.
///
/// Falls back to a random pick when nothing matches, and returns nothing
/// when fewer than three items are available.
pub fn recommend_by_keywords<R: Rng + ?Sized>(
    question: &str,
    items: &[MenuItem],
    rng: &mut R,
) -> Vec<MenuItem> {
    if items.len() < MENU_RECOMMENDATION_COUNT {
        return Vec::new();
    }

    let mut matching: Vec<&MenuItem> = Vec::new();
    for (topic, words) in ADVICE_KEYWORDS {
        if !question.contains(topic) {
            continue;
        }
        for item in items {
            if words.iter().any(|w| item.mentions(w)) && !matching.iter().any(|m| m.id == item.id)
            {
                matching.push(item);
            }
        }
    }

    let pool: Vec<&MenuItem> = if matching.is_empty() {
        items.iter().collect()
    } else {
        matching
    };

    if pool.len() <= MENU_RECOMMENDATION_COUNT {
        return pool.into_iter().cloned().collect();
    }

    pool.choose_multiple(rng, MENU_RECOMMENDATION_COUNT)
        .map(|item| (*item).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use uuid::Uuid;

    use super::*;

    fn item(name: &str) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: 100.0,
            image_url: None,
            is_vegetarian: false,
            is_spicy: false,
            is_available: true,
        }
    }

    #[test]
    fn parses_json_answer_with_suggestion_list() {
        let text = r#"分析如下
{
  "calories": 650,
  "protein": "30",
  "carbs": 80,
  "fat": 20,
  "nutritional_value": "蛋白質充足",
  "health_impact": "油脂略高",
  "improvement_suggestions": ["多吃蔬菜", "少喝含糖飲料",],
}"#;
        let analysis = parse_food_analysis(text);
        assert_eq!(analysis.calories, Some(650.0));
        assert_eq!(analysis.protein, Some(30.0));
        assert_eq!(analysis.improvement_suggestions, vec!["多吃蔬菜", "少喝含糖飲料"]);
        assert_eq!(analysis.error, None);
    }

    #[test]
    fn suggestion_string_is_split() {
        let text = r#"{"calories": 500, "improvement_suggestions": "多喝水, 少油炸"}"#;
        let analysis = parse_food_analysis(text);
        assert_eq!(analysis.improvement_suggestions, vec!["多喝水", "少油炸"]);
    }

    #[test]
    fn falls_back_to_labelled_text() {
        let text = "熱量：約 700 大卡\n蛋白質 35 克\n碳水化合物 90 克\n脂肪 25 克\n營養價值\n主食份量大\n健康影響\n容易飽足\n改善建議\n減少白飯\n加一份青菜";
        let analysis = parse_food_analysis(text);
        assert_eq!(analysis.calories, Some(700.0));
        assert_eq!(analysis.protein, Some(35.0));
        assert_eq!(analysis.carbs, Some(90.0));
        assert_eq!(analysis.fat, Some(25.0));
        assert_eq!(analysis.nutritional_value.as_deref(), Some("主食份量大"));
        assert_eq!(analysis.health_impact.as_deref(), Some("容易飽足"));
        assert_eq!(analysis.improvement_suggestions, vec!["減少白飯", "加一份青菜"]);
    }

    #[test]
    fn unparseable_text_keeps_raw_response() {
        let analysis = parse_food_analysis("抱歉，我無法判斷。");
        assert_eq!(analysis.text_response.as_deref(), Some("抱歉，我無法判斷。"));
        assert_eq!(analysis.error.as_deref(), Some(UNPARSEABLE_ANALYSIS));
    }

    #[test]
    fn record_name_uses_first_dish() {
        assert_eq!(suggested_record_name("雞腿便當、味噌湯"), "雞腿便當");
    }

    #[test]
    fn long_record_name_is_truncated() {
        let long = "很".repeat(60);
        let name = suggested_record_name(&long);
        assert_eq!(name.chars().count(), 50);
        assert!(name.ends_with("..."));
    }

    #[test]
    fn too_few_items_yield_no_recommendation() {
        let items = vec![item("雞胸沙拉"), item("牛肉麵")];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(recommend_by_keywords("蛋白質", &items, &mut rng).is_empty());
    }

    #[test]
    fn keyword_matches_are_preferred() {
        let items = vec![item("雞胸沙拉"), item("珍珠奶茶"), item("炸薯條"), item("可樂")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = recommend_by_keywords("想補充蛋白質", &items, &mut rng);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "雞胸沙拉");
    }

    #[test]
    fn no_match_picks_three_at_random() {
        let items = vec![item("珍珠奶茶"), item("炸薯條"), item("可樂"), item("鬆餅")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = recommend_by_keywords("今天吃什麼", &items, &mut rng);
        assert_eq!(picked.len(), 3);
    }
}
