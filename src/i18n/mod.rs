mod catalog;
mod label;

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

pub use catalog::MessageCatalog;
pub use label::{LabelQuery, field_label_translation_args, humanize};

/// Interpolation values for a phrase. The `_` entry is the fallback phrase.
pub type TranslationArgs = Map<String, Value>;

pub const DEFAULT_PHRASE_KEY: &str = "_";
pub const SMART_COUNT_KEY: &str = "smart_count";

const PLURAL_SEPARATOR: &str = "||||";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{\s*(\w+)\s*\}").expect("placeholder pattern compiles"));

pub trait Translator {
    fn translate(&self, key: &str, args: &TranslationArgs) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &TranslationArgs) -> String,
{
    fn translate(&self, key: &str, args: &TranslationArgs) -> String {
        self(key, args)
    }
}

/// Translator without messages: answers with the `_` fallback or the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str, args: &TranslationArgs) -> String {
        render_phrase(fallback_phrase(key, args), args)
    }
}

pub(crate) fn fallback_phrase<'a>(key: &'a str, args: &'a TranslationArgs) -> &'a str {
    match args.get(DEFAULT_PHRASE_KEY) {
        Some(Value::String(phrase)) => phrase,
        _ => key,
    }
}

/// Picks the plural form and fills `%{name}` placeholders from `args`.
pub(crate) fn render_phrase(phrase: &str, args: &TranslationArgs) -> String {
    let selected = select_plural_form(phrase, args);
    PLACEHOLDER
        .replace_all(selected, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match args.get(name) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) | None => caps[0].to_string(),
                Some(other) => other.to_string(),
            }
        })
        .into_owned()
}

fn select_plural_form<'a>(phrase: &'a str, args: &TranslationArgs) -> &'a str {
    if !phrase.contains(PLURAL_SEPARATOR) {
        return phrase;
    }
    let Some(count) = args.get(SMART_COUNT_KEY).and_then(Value::as_f64) else {
        return phrase;
    };
    let forms: Vec<&str> = phrase.split(PLURAL_SEPARATOR).map(str::trim).collect();
    let index = if count == 1.0 { 0 } else { 1 };
    forms
        .get(index)
        .or_else(|| forms.last())
        .copied()
        .unwrap_or(phrase)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn args(value: Value) -> TranslationArgs {
        match value {
            Value::Object(map) => map,
            _ => TranslationArgs::new(),
        }
    }

    #[test]
    fn identity_prefers_default_phrase() {
        let translated = IdentityTranslator.translate("resources.books.fields.title", &args(json!({"_": "Title"})));
        assert_eq!(translated, "Title");
        assert_eq!(IdentityTranslator.translate("plain.key", &TranslationArgs::new()), "plain.key");
    }

    #[test]
    fn interpolates_placeholders_and_keeps_unknown_ones() {
        let rendered = render_phrase("Item %{index} of %{total} (%{missing})", &args(json!({"index": 2, "total": "5"})));
        assert_eq!(rendered, "Item 2 of 5 (%{missing})");
    }

    #[test]
    fn selects_plural_form_from_smart_count() {
        let phrase = "%{smart_count} item |||| %{smart_count} items";
        assert_eq!(render_phrase(phrase, &args(json!({"smart_count": 1}))), "1 item");
        assert_eq!(render_phrase(phrase, &args(json!({"smart_count": 3}))), "3 items");
    }

    #[test]
    fn closures_act_as_translators() {
        let upper = |key: &str, _: &TranslationArgs| key.to_uppercase();
        assert_eq!(upper.translate("abc", &TranslationArgs::new()), "ABC");
    }
}
