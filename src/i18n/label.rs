use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{DEFAULT_PHRASE_KEY, TranslationArgs};

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym pattern compiles"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("camel pattern compiles"));

/// Inputs for label inference. Empty strings count as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelQuery<'a> {
    pub label: Option<&'a str>,
    pub parent_source: Option<&'a str>,
    pub resource: Option<&'a str>,
    pub source: Option<&'a str>,
}

impl<'a> LabelQuery<'a> {
    pub fn new(source: Option<&'a str>) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn with_parent_source(mut self, parent_source: &'a str) -> Self {
        self.parent_source = Some(parent_source);
        self
    }

    pub fn with_resource(mut self, resource: &'a str) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Maps a field's location to the `(key, args)` pair fed to the translator.
///
/// Numeric path segments are dropped from the key so that `items.2.name`
/// and `items.0.name` share one message. The `_` argument carries a
/// humanized label used when the catalog has no entry.
pub fn field_label_translation_args(query: &LabelQuery<'_>) -> (String, TranslationArgs) {
    let mut args = TranslationArgs::new();
    if let Some(label) = non_empty(query.label) {
        args.insert(DEFAULT_PHRASE_KEY.to_string(), Value::String(label.to_string()));
        return (label.to_string(), args);
    }
    let Some(source) = non_empty(query.source) else {
        return (String::new(), args);
    };

    let default_label = humanize(source_suffix(source));
    args.insert(
        DEFAULT_PHRASE_KEY.to_string(),
        Value::String(default_label.clone()),
    );

    let source_key = strip_numeric_segments(source);
    let key = match (non_empty(query.resource), non_empty(query.parent_source)) {
        (Some(resource), Some(parent)) => format!(
            "resources.{resource}.fields.{}.{source_key}",
            strip_numeric_segments(parent)
        ),
        (Some(resource), None) => format!("resources.{resource}.fields.{source_key}"),
        (None, _) => default_label,
    };
    (key, args)
}

/// `firstName` → `First name`, `author_id` → `Author`, `address.city` → `Address city`.
pub fn humanize(source: &str) -> String {
    let spaced = source.replace('.', " ");
    let underscored = ACRONYM_BOUNDARY.replace_all(&spaced, "${1}_${2}");
    let underscored = CAMEL_BOUNDARY.replace_all(&underscored, "${1}_${2}");
    let mut words = underscored.replace('-', "_").to_lowercase();
    if let Some(stripped) = words.strip_suffix("_id") {
        words = stripped.to_string();
    }
    let words = words.replace('_', " ");
    let words = words.trim();

    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}

fn strip_numeric_segments(path: &str) -> String {
    path.split('.')
        .filter(|segment| !is_numeric_segment(segment))
        .collect::<Vec<_>>()
        .join(".")
}

/// Part of the path after its last numeric segment.
fn source_suffix(path: &str) -> &str {
    let mut offset = 0;
    let mut suffix_start = 0;
    for segment in path.split('.') {
        offset += segment.len() + 1;
        if is_numeric_segment(segment) {
            suffix_start = offset.min(path.len());
        }
    }
    &path[suffix_start..]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_field_key_uses_parent_source() {
        let query = LabelQuery::new(Some("name"))
            .with_parent_source("items")
            .with_resource("books");
        let (key, args) = field_label_translation_args(&query);
        assert_eq!(key, "resources.books.fields.items.name");
        assert_eq!(args.get("_"), Some(&json!("Name")));
    }

    #[test]
    fn indexed_paths_collapse_to_one_key() {
        let query = LabelQuery::new(Some("authors.3.firstName"))
            .with_parent_source("books.0.items")
            .with_resource("orders");
        let (key, args) = field_label_translation_args(&query);
        assert_eq!(key, "resources.orders.fields.books.items.authors.firstName");
        assert_eq!(args.get("_"), Some(&json!("First name")));
    }

    #[test]
    fn missing_source_yields_empty_key() {
        let (key, args) = field_label_translation_args(&LabelQuery::new(None).with_resource("books"));
        assert_eq!(key, "");
        assert!(args.is_empty());
    }

    #[test]
    fn explicit_label_wins() {
        let query = LabelQuery::new(Some("name")).with_label("custom.label");
        let (key, args) = field_label_translation_args(&query);
        assert_eq!(key, "custom.label");
        assert_eq!(args.get("_"), Some(&json!("custom.label")));
    }

    #[test]
    fn without_resource_the_default_label_is_the_key() {
        let (key, _) = field_label_translation_args(&LabelQuery::new(Some("publishedAt")));
        assert_eq!(key, "Published at");
    }

    #[test]
    fn humanize_handles_common_shapes() {
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("address.city"), "Address city");
        assert_eq!(humanize("ISBNCode"), "Isbn code");
        assert_eq!(humanize("unit-price"), "Unit price");
    }

    #[test]
    fn suffix_follows_last_numeric_segment() {
        assert_eq!(source_suffix("items.2.name"), "name");
        assert_eq!(source_suffix("name"), "name");
        assert_eq!(source_suffix("items.2"), "");
    }
}
