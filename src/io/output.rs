use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Serialize a value in the requested format.
pub fn serialize_value(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON output")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON output")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            let _ = pretty;
            serde_yaml::to_string(value).context("failed to serialize YAML output")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            // TOML documents need a table at the root.
            let wrapped = match value {
                Value::Object(_) => value.clone(),
                other => serde_json::json!({ "items": other }),
            };
            if pretty {
                toml::to_string_pretty(&wrapped).context("failed to serialize TOML output")
            } else {
                toml::to_string(&wrapped).context("failed to serialize TOML output")
            }
        }
    }
}
