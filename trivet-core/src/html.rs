//! Structured-markup discovery and plain-text extraction for scraped pages.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Find the first embedded JSON-LD block describing a schema.org Recipe.
///
/// Publishers often nest the Recipe node one level inside a `@graph`
/// wrapper or a top-level array; both are handled. The first block whose
/// type matches wins - a page embedding several recipes contributes exactly
/// one, and blocks are never merged.
pub fn find_embedded_recipe(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[type='application/ld+json']").expect("Invalid selector");

    for element in document.select(&selector) {
        let sanitized = sanitize_json(&element.inner_html());
        let json: Value = match serde_json::from_str(&sanitized) {
            Ok(v) => v,
            Err(_) => continue, // Try next script tag
        };

        if let Some(recipe) = recipe_node(&json) {
            return Some(recipe.clone());
        }
    }

    None
}

/// Locate a Recipe object: directly, one level inside `@graph`, or as an
/// element of a top-level array.
fn recipe_node(json: &Value) -> Option<&Value> {
    if is_recipe_object(json) {
        return Some(json);
    }

    match json {
        Value::Object(obj) => obj
            .get("@graph")?
            .as_array()?
            .iter()
            .find(|v| is_recipe_object(v)),
        Value::Array(items) => items.iter().find(|v| is_recipe_object(v)),
        _ => None,
    }
}

fn is_recipe_object(json: &Value) -> bool {
    let Some(type_val) = json.get("@type") else {
        return false;
    };
    match type_val {
        Value::String(s) => s == "Recipe",
        Value::Array(arr) => arr.iter().any(|v| v == "Recipe"),
        _ => false,
    }
}

/// Sanitize JSON-LD content to handle common malformed patterns.
/// Some sites include literal newlines/tabs inside JSON strings instead of
/// escaped versions.
fn sanitize_json(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut prev_char = '\0';

    for c in json.chars() {
        if c == '"' && prev_char != '\\' {
            in_string = !in_string;
            result.push(c);
        } else if in_string {
            match c {
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => {
                    // Skip other control characters
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
        prev_char = c;
    }

    result
}

/// Extract image URL from the og:image meta tag, the usual fallback when
/// recipe markup omits its own image.
pub fn extract_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(|s| s.to_string())
}

/// Extract a page's visible text: script/style content skipped, tags
/// stripped, whitespace collapsed, truncated to `max_chars` to keep
/// downstream prompts bounded.
pub fn visible_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut buf = String::new();
    collect_visible_text(document.root_element(), &mut buf);

    let collapsed = buf.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        collapsed.chars().take(max_chars).collect()
    }
}

fn collect_visible_text(element: ElementRef, out: &mut String) {
    if matches!(element.value().name(), "script" | "style" | "noscript") {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(el) = ElementRef::wrap(child) {
            collect_visible_text(el, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_recipe_in_flat_block() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Recipe", "name": "Test Recipe", "recipeIngredient": ["1 cup flour"]}
            </script>
            </head><body></body></html>
        "#;

        let recipe = find_embedded_recipe(html).unwrap();
        assert_eq!(recipe["name"], "Test Recipe");
    }

    #[test]
    fn test_find_recipe_inside_graph_wrapper() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@graph": [
                {"@type": "WebSite", "name": "Some Blog"},
                {"@type": "Recipe", "name": "Graph Recipe"}
            ]}
            </script>
            </head><body></body></html>
        "#;

        let recipe = find_embedded_recipe(html).unwrap();
        assert_eq!(recipe["name"], "Graph Recipe");
    }

    #[test]
    fn test_first_recipe_block_wins() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "Recipe", "name": "First"}
            </script>
            <script type="application/ld+json">
            {"@type": "Recipe", "name": "Second"}
            </script>
            </head><body></body></html>
        "#;

        let recipe = find_embedded_recipe(html).unwrap();
        assert_eq!(recipe["name"], "First");
    }

    #[test]
    fn test_non_recipe_blocks_skipped() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type": "BreadcrumbList"}
            </script>
            <script type="application/ld+json">
            {"@type": ["Recipe", "Thing"], "name": "Typed Array Recipe"}
            </script>
            </head><body></body></html>
        "#;

        let recipe = find_embedded_recipe(html).unwrap();
        assert_eq!(recipe["name"], "Typed Array Recipe");
    }

    #[test]
    fn test_no_structured_data() {
        let html = "<html><body><p>Just a blog post.</p></body></html>";
        assert!(find_embedded_recipe(html).is_none());
    }

    #[test]
    fn test_sanitize_json_escapes_literal_newlines_in_strings() {
        let html = "<html><head><script type=\"application/ld+json\">\
            {\"@type\": \"Recipe\", \"name\": \"Line\nBreak\"}\
            </script></head></html>";

        let recipe = find_embedded_recipe(html).unwrap();
        assert_eq!(recipe["name"], "Line\nBreak");
    }

    #[test]
    fn test_visible_text_strips_markup_and_collapses_whitespace() {
        let html = r#"
            <html><head>
            <style>body { color: red; }</style>
            <script>var tracking = true;</script>
            </head><body>
            <h1>Carrot   Soup</h1>
            <p>Peel the
            carrots.</p>
            </body></html>
        "#;

        let text = visible_text(html, 10_000);
        assert_eq!(text, "Carrot Soup Peel the carrots.");
    }

    #[test]
    fn test_visible_text_truncates() {
        let html = format!("<html><body><p>{}</p></body></html>", "word ".repeat(5_000));
        let text = visible_text(&html, 100);
        assert_eq!(text.chars().count(), 100);
    }

    #[test]
    fn test_extract_og_image() {
        let html = r#"
            <html><head>
            <meta property="og:image" content="https://example.com/image.jpg">
            </head><body></body></html>
        "#;

        assert_eq!(
            extract_og_image(html),
            Some("https://example.com/image.jpg".to_string())
        );
    }
}
