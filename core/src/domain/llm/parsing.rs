use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FIRST_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*?\}").expect("valid regex"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));

/// Removes a leading ```json (or bare ```) fence and a trailing ``` fence.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// Finds a JSON object embedded in free text.
///
/// The widest `{ ... }` span is tried first so nested objects survive, then the
/// first non-greedy match. Trailing commas are tolerated.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let widest = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&text[start..=end]),
        _ => None,
    };
    let first = FIRST_OBJECT.find(text).map(|m| m.as_str());

    widest
        .into_iter()
        .chain(first)
        .filter_map(|candidate| serde_json::from_str::<Value>(&remove_trailing_commas(candidate)).ok())
        .find(Value::is_object)
}

/// Reads a number that the model may have written as a string such as "450 kcal".
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strips_json_fence() {
        let text = "```json\n{\"store_type\": \"拉麵\"}\n```";
        assert_eq!(strip_code_fences(text), "{\"store_type\": \"拉麵\"}");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = "好的，以下是分析：\n{\"calories\": 650, \"protein\": 25,}\n希望有幫助";
        assert_eq!(
            extract_json_object(text),
            Some(json!({"calories": 650, "protein": 25}))
        );
    }

    #[test]
    fn keeps_nested_objects() {
        let text = "{\"a\": {\"b\": 1}, \"c\": [1, 2,]}";
        assert_eq!(
            extract_json_object(text),
            Some(json!({"a": {"b": 1}, "c": [1, 2]}))
        );
    }

    #[test]
    fn falls_back_to_first_object() {
        let text = "{\"a\": 1} 以及 {\"b\": 2}";
        assert_eq!(extract_json_object(text), Some(json!({"a": 1})));
    }

    #[test]
    fn no_object_yields_none() {
        assert_eq!(extract_json_object("沒有任何 JSON"), None);
    }

    #[test]
    fn lenient_number_reads_strings() {
        assert_eq!(lenient_number(&json!(12.5)), Some(12.5));
        assert_eq!(lenient_number(&json!("450 kcal")), Some(450.0));
        assert_eq!(lenient_number(&json!("約")), None);
    }
}
