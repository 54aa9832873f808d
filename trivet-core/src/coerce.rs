//! Shared field-level normalizers used by both extractors.
//!
//! Everything here is pure and deterministic: the structured and generative
//! paths must converge on identical output for identical input.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Title applied when extraction yields none.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// ISO-8601-style durations of the form `PT[n]H[n]M`.
static ISO_DURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?$").expect("Invalid duration regex"));

/// Format an ISO-8601-style duration (`PT1H30M`) as a human-readable string
/// (`1h 30min`). Zero or absent components are omitted. Anything that does
/// not parse is passed through unchanged - partial information beats strict
/// validation here.
pub fn format_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Some(caps) = ISO_DURATION_REGEX.captures(trimmed) else {
        return raw.to_string();
    };

    let hours: u64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let minutes: u64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}min", minutes));
    }
    parts.join(" ")
}

/// Flatten a `recipeInstructions`-shaped value into one step per string.
///
/// A whole-field string is split on newlines with blank lines dropped. Array
/// elements are taken verbatim when they are strings; step objects
/// contribute their text-like field; anything else is rendered as a
/// displayable string rather than dropped.
pub fn flatten_instructions(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items.iter().filter_map(instruction_step).collect(),
        _ => Vec::new(),
    }
}

fn instruction_step(item: &Value) -> Option<String> {
    if let Some(s) = item.as_str() {
        return Some(s.to_string());
    }
    if let Some(obj) = item.as_object() {
        for key in ["text", "name"] {
            if let Some(text) = obj.get(key).and_then(Value::as_str) {
                return Some(text.to_string());
            }
        }
        return serde_json::to_string(item).ok();
    }
    Some(item.to_string())
}

/// Flatten a `recipeIngredient`-shaped value. A sequence is used as-is, a
/// single string becomes a one-element sequence, anything else is empty.
/// Wording stays verbatim.
pub fn flatten_ingredients(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Read a string field of an untrusted JSON object, with an empty-string
/// default for absent or wrong-shaped values.
pub fn string_or_default(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read a list-of-strings field of an untrusted JSON object, accepting a
/// bare string as a one-element list, with an empty default otherwise.
pub fn string_list_or_default(obj: &Value, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Coerce a `recipeYield`-shaped value to a servings string. Sequences take
/// their first element; numbers are rendered as written.
pub fn coerce_servings(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.first().map(coerce_servings).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Apply the default title when extraction yielded none.
pub fn title_or_untitled(title: String) -> String {
    if title.trim().is_empty() {
        UNTITLED_RECIPE.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration("PT1H30M"), "1h 30min");
    }

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration("PT45M"), "45min");
    }

    #[test]
    fn test_format_duration_hours_only() {
        assert_eq!(format_duration("PT2H"), "2h");
    }

    #[test]
    fn test_format_duration_empty() {
        assert_eq!(format_duration(""), "");
    }

    #[test]
    fn test_format_duration_zero_components_omitted() {
        assert_eq!(format_duration("PT0H45M"), "45min");
        assert_eq!(format_duration("PT0M"), "");
    }

    #[test]
    fn test_format_duration_unparsable_passes_through() {
        assert_eq!(format_duration("about an hour"), "about an hour");
        assert_eq!(format_duration("45 minutes"), "45 minutes");
        assert_eq!(format_duration("PT1H30M5S"), "PT1H30M5S");
    }

    #[test]
    fn test_flatten_instructions_array_of_strings() {
        let value = json!(["a", "b"]);
        assert_eq!(flatten_instructions(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_flatten_instructions_newline_string() {
        let value = json!("a\nb\n");
        assert_eq!(flatten_instructions(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_flatten_instructions_blank_lines_dropped() {
        let value = json!("Mix.\n\n\nBake.\n");
        assert_eq!(flatten_instructions(&value), vec!["Mix.", "Bake."]);
    }

    #[test]
    fn test_flatten_instructions_step_objects() {
        let value = json!([{"text": "a"}]);
        assert_eq!(flatten_instructions(&value), vec!["a"]);

        let value = json!([{"@type": "HowToStep", "name": "Preheat"}]);
        assert_eq!(flatten_instructions(&value), vec!["Preheat"]);
    }

    #[test]
    fn test_flatten_instructions_unknown_object_serialized_not_dropped() {
        let value = json!([{"itemListElement": ["x"]}]);
        let steps = flatten_instructions(&value);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("itemListElement"));
    }

    #[test]
    fn test_flatten_instructions_null_is_empty() {
        assert!(flatten_instructions(&Value::Null).is_empty());
    }

    #[test]
    fn test_flatten_ingredients() {
        assert_eq!(
            flatten_ingredients(&json!(["2 eggs", "1 cup flour"])),
            vec!["2 eggs", "1 cup flour"]
        );
        assert_eq!(flatten_ingredients(&json!("2 eggs")), vec!["2 eggs"]);
        assert!(flatten_ingredients(&json!(42)).is_empty());
        assert!(flatten_ingredients(&Value::Null).is_empty());
    }

    #[test]
    fn test_flatten_ingredients_keeps_wording_verbatim() {
        let value = json!(["  2 eggs, beaten  "]);
        assert_eq!(flatten_ingredients(&value), vec!["  2 eggs, beaten  "]);
    }

    #[test]
    fn test_coerce_servings() {
        assert_eq!(coerce_servings(&json!("4 servings")), "4 servings");
        assert_eq!(coerce_servings(&json!(6)), "6");
        assert_eq!(coerce_servings(&json!(["8 slices", "4 servings"])), "8 slices");
        assert_eq!(coerce_servings(&json!({"value": 4})), "");
    }

    #[test]
    fn test_string_or_default() {
        let obj = json!({"title": "Pancakes", "servings": 4});
        assert_eq!(string_or_default(&obj, "title"), "Pancakes");
        assert_eq!(string_or_default(&obj, "missing"), "");
        // wrong shape degrades to default, never errors
        assert_eq!(string_or_default(&obj, "servings"), "");
    }

    #[test]
    fn test_string_list_or_default() {
        let obj = json!({"tags": ["dinner", "quick"], "one": "dessert"});
        assert_eq!(string_list_or_default(&obj, "tags"), vec!["dinner", "quick"]);
        assert_eq!(string_list_or_default(&obj, "one"), vec!["dessert"]);
        assert!(string_list_or_default(&obj, "missing").is_empty());
    }

    #[test]
    fn test_title_or_untitled() {
        assert_eq!(title_or_untitled("Pancakes".to_string()), "Pancakes");
        assert_eq!(title_or_untitled(String::new()), UNTITLED_RECIPE);
        assert_eq!(title_or_untitled("   ".to_string()), UNTITLED_RECIPE);
    }
}
