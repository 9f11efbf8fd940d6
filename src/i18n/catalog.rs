use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;

use super::{TranslationArgs, Translator, fallback_phrase, render_phrase};
use crate::io::{DocumentFormat, parse_document_str};

/// Flat phrase table keyed by dotted paths (`resources.books.fields.title`).
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    locale: String,
    messages: IndexMap<String, String>,
}

impl MessageCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: IndexMap::new(),
        }
    }

    /// Flattens a nested message document. Arrays and nulls are ignored.
    pub fn from_value(locale: impl Into<String>, document: &Value) -> Self {
        let mut catalog = Self::new(locale);
        catalog.merge_value(document);
        catalog
    }

    pub fn from_document_str(
        locale: impl Into<String>,
        contents: &str,
        format: DocumentFormat,
    ) -> Result<Self> {
        let locale = locale.into();
        let document = parse_document_str(contents, format)
            .with_context(|| format!("failed to load messages for locale '{locale}'"))?;
        if !document.is_object() {
            anyhow::bail!("messages for locale '{locale}' must be a mapping");
        }
        let catalog = Self::from_value(locale, &document);
        tracing::debug!(
            locale = %catalog.locale,
            messages = catalog.len(),
            "loaded message catalog"
        );
        Ok(catalog)
    }

    pub fn merge_value(&mut self, document: &Value) {
        flatten_into(&mut self.messages, String::new(), document);
    }

    pub fn insert(&mut self, key: impl Into<String>, phrase: impl Into<String>) {
        self.messages.insert(key.into(), phrase.into());
    }

    pub fn with_message(mut self, key: impl Into<String>, phrase: impl Into<String>) -> Self {
        self.insert(key, phrase);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, args: &TranslationArgs) -> String {
        let phrase = match self.get(key) {
            Some(phrase) => phrase,
            None => {
                if !key.is_empty() {
                    tracing::trace!(locale = %self.locale, key, "missing translation");
                }
                fallback_phrase(key, args)
            }
        };
        render_phrase(phrase, args)
    }
}

fn flatten_into(acc: &mut IndexMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(acc, path, child);
            }
        }
        Value::String(text) => {
            acc.insert(prefix, text.clone());
        }
        Value::Number(number) => {
            acc.insert(prefix, number.to_string());
        }
        Value::Bool(flag) => {
            acc.insert(prefix, flag.to_string());
        }
        Value::Array(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::from_value(
            "en",
            &json!({
                "resources": {
                    "books": {
                        "name": "Book |||| Books",
                        "fields": {
                            "items": {"title": "Line title"}
                        }
                    }
                }
            }),
        )
    }

    #[test]
    fn flattens_nested_documents() {
        let catalog = catalog();
        assert_eq!(catalog.get("resources.books.fields.items.title"), Some("Line title"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn missing_keys_fall_back_to_default_phrase() {
        let catalog = catalog();
        let mut args = TranslationArgs::new();
        args.insert("_".into(), json!("Price"));
        assert_eq!(catalog.translate("resources.books.fields.items.price", &args), "Price");
        assert_eq!(
            catalog.translate("resources.books.fields.items.price", &TranslationArgs::new()),
            "resources.books.fields.items.price"
        );
    }

    #[test]
    fn loads_json_documents() {
        let catalog = MessageCatalog::from_document_str(
            "fr",
            r#"{"ra": {"action": {"remove": "Supprimer"}}}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(catalog.locale(), "fr");
        assert_eq!(catalog.get("ra.action.remove"), Some("Supprimer"));
    }

    #[test]
    fn rejects_non_mapping_documents() {
        let err = MessageCatalog::from_document_str("en", "[1, 2]", DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }
}
