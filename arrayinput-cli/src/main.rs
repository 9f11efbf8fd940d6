use std::fmt::Write as FmtWrite;
use std::io::{self, Read};
use std::path::Path;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde::Serialize;
use serde_json::Value;

use arrayinput::{
    ArrayInputState, ArrayInputUI, DisableRemove, DocumentFormat, Element, FormIterator,
    IdentityTranslator, IteratorOptions, MessageCatalog, PropValue, RenderedItem, SharedArrayInput,
    Translator, UiOptions, element::keys, parse_document_str, read_document, serialize_value,
    value_at,
};

#[derive(Debug, Parser)]
#[command(
    name = "arrayinput",
    version,
    about = "Edit a list of records as repeatable form rows in the terminal"
)]
struct Cli {
    /// Records spec: file path, inline JSON, or "-" for stdin
    #[arg(short = 'r', long = "records", value_name = "SPEC")]
    records: String,

    /// Path of the array field; also picks the array out of an object document
    #[arg(short = 's', long = "source", value_name = "PATH", default_value = "items")]
    source: String,

    /// Resource name used for label lookups
    #[arg(long = "resource", value_name = "NAME", default_value = "")]
    resource: String,

    /// Field per row: SOURCE, SOURCE=LABEL, SOURCE= (no label), or "." for the whole value
    #[arg(short = 'F', long = "field", value_name = "FIELD", action = ArgAction::Append)]
    fields: Vec<String>,

    /// Message catalog used to translate labels
    #[arg(short = 'm', long = "messages", value_name = "PATH")]
    messages: Option<String>,

    /// Locale name recorded for the message catalog
    #[arg(long = "locale", value_name = "LOCALE", default_value = "en")]
    locale: String,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Render every row read-only
    #[arg(long = "disabled")]
    disabled: bool,

    /// Hide the add action
    #[arg(long = "disable-add")]
    disable_add: bool,

    /// Hide the remove control on every row
    #[arg(long = "disable-remove", conflicts_with = "lock_field")]
    disable_remove: bool,

    /// Hide the remove control on rows where this record field is truthy
    #[arg(long = "lock-field", value_name = "FIELD")]
    lock_field: Option<String>,

    /// Hide the reorder controls
    #[arg(long = "disable-reordering")]
    disable_reordering: bool,

    /// Print the rendered rows as JSON instead of starting the UI
    #[arg(long = "print")]
    print: bool,

    /// Emit compact JSON rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut diagnostics = DiagnosticCollector::default();
    let records = match load_records(&cli.records, &cli.source) {
        Ok(records) => Some(records),
        Err(err) => {
            diagnostics.push_input("records", format!("{err:#}"));
            None
        }
    };
    let catalog = match cli.messages.as_deref() {
        Some(path) => match load_catalog(path, &cli.locale) {
            Ok(catalog) => Some(catalog),
            Err(err) => {
                diagnostics.push_input("messages", format!("{err:#}"));
                None
            }
        },
        None => None,
    };
    let fields = parse_fields(&cli.fields, &mut diagnostics);
    diagnostics.into_result()?;

    let records = records.unwrap_or_default();
    tracing::info!(records = records.len(), source = %cli.source, "loaded records");

    let state = SharedArrayInput::new(ArrayInputState::new(cli.source.clone(), records));
    let iterator = FormIterator::new(state, build_options(&cli, fields));

    if cli.print {
        let translator: Box<dyn Translator> = match catalog {
            Some(catalog) => Box::new(catalog),
            None => Box::new(IdentityTranslator),
        };
        let rows: Vec<RowView> = iterator
            .render(translator.as_ref())
            .iter()
            .map(RowView::from_item)
            .collect();
        let payload = if cli.no_pretty {
            serde_json::to_string(&rows)
        } else {
            serde_json::to_string_pretty(&rows)
        }
        .wrap_err("failed to serialize rendered rows")?;
        println!("{payload}");
        return Ok(());
    }

    let mut ui = ArrayInputUI::new(iterator).with_options(UiOptions::default());
    if let Some(catalog) = catalog {
        ui = ui.with_translator(catalog);
    }
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }
    let value = ui.run().map_err(Report::msg)?;
    let output = serialize_value(&value, DocumentFormat::Json, !cli.no_pretty)
        .map_err(Report::msg)?;
    println!("{output}");
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_options(cli: &Cli, fields: Vec<Element>) -> IteratorOptions {
    let mut options = IteratorOptions::new()
        .with_resource(cli.resource.clone())
        .with_disabled(cli.disabled)
        .with_disable_add(cli.disable_add)
        .with_disable_reordering(cli.disable_reordering);
    if cli.disable_remove {
        options = options.with_disable_remove(true);
    } else if let Some(field) = cli.lock_field.clone() {
        options = options.with_disable_remove(DisableRemove::predicate(move |record| {
            is_truthy(record.get(&field))
        }));
    }
    for field in fields {
        options = options.with_field(field);
    }
    options
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(num)) => num.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn parse_fields(specs: &[String], diagnostics: &mut DiagnosticCollector) -> Vec<Element> {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        let (source, label) = match spec.split_once('=') {
            Some((source, label)) => (source.trim(), Some(label)),
            None => (spec.trim(), None),
        };
        if source.is_empty() {
            diagnostics.push_input("field", format!("'{spec}' has no source"));
            continue;
        }
        let mut field = Element::new("TextInput");
        if source != "." {
            field = field.with_source(source);
        }
        if let Some(label) = label {
            field = field.with_prop(keys::LABEL, label);
        }
        fields.push(field);
    }
    fields
}

fn load_records(spec: &str, source: &str) -> Result<Vec<Value>> {
    let document = if spec == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .wrap_err("failed to read records from stdin")?;
        parse_document_str(&contents, DocumentFormat::Json).map_err(Report::msg)?
    } else if Path::new(spec).exists() {
        read_document(Path::new(spec)).map_err(Report::msg)?
    } else {
        parse_document_str(spec, DocumentFormat::Json)
            .map_err(Report::msg)
            .wrap_err("records spec is neither a file nor inline JSON")?
    };
    extract_records(document, source)
}

fn extract_records(document: Value, source: &str) -> Result<Vec<Value>> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(source) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(eyre!("field '{source}' is not an array")),
            None => Err(eyre!("document has no '{source}' array")),
        },
        _ => Err(eyre!("expected an array of records")),
    }
}

fn load_catalog(path: &str, locale: &str) -> Result<MessageCatalog> {
    let path = Path::new(path);
    let format = DocumentFormat::from_path(path).unwrap_or_default();
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    MessageCatalog::from_document_str(locale, &contents, format).map_err(Report::msg)
}

#[derive(Debug, Serialize)]
struct RowView {
    index: usize,
    member: String,
    label: String,
    reorder_class: Option<String>,
    remove_class: Option<String>,
    fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
struct FieldView {
    source: Option<String>,
    label: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<i64>,
    disabled: bool,
    value: Value,
}

impl RowView {
    fn from_item(item: &RenderedItem) -> Self {
        let fields = item
            .fields
            .iter()
            .map(|field| {
                let source = field.source().map(str::to_string);
                let value = source
                    .as_deref()
                    .and_then(|source| value_at(&item.record, &item.member, source))
                    .cloned()
                    .unwrap_or(Value::Null);
                FieldView {
                    label: field.prop(keys::LABEL).map(label_value).unwrap_or(Value::Null),
                    index: field.int_prop(keys::INDEX),
                    disabled: field.bool_prop(keys::DISABLED).unwrap_or(false),
                    source,
                    value,
                }
            })
            .collect();
        Self {
            index: item.index,
            member: item.member.clone(),
            label: item.label.clone(),
            reorder_class: item
                .reorder_buttons
                .as_ref()
                .and_then(|control| control.class_name().map(str::to_string)),
            remove_class: item
                .remove_button
                .as_ref()
                .and_then(|control| control.class_name().map(str::to_string)),
            fields,
        }
    }
}

fn label_value(label: &PropValue) -> Value {
    match label {
        PropValue::Bool(flag) => Value::Bool(*flag),
        PropValue::Str(text) => Value::String(text.clone()),
        PropValue::Json(value) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

#[derive(Debug, Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_array_from_object_documents() {
        let records = extract_records(json!({"items": [{"a": 1}]}), "items").unwrap();
        assert_eq!(records.len(), 1);
        assert!(extract_records(json!({"other": []}), "items").is_err());
        assert!(extract_records(json!("text"), "items").is_err());
    }

    #[test]
    fn field_specs_map_to_elements() {
        let mut diagnostics = DiagnosticCollector::default();
        let specs = vec![
            "title".to_string(),
            "price=Cost".to_string(),
            "note=".to_string(),
            ".".to_string(),
            "=orphan".to_string(),
        ];
        let fields = parse_fields(&specs, &mut diagnostics);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].source(), Some("title"));
        assert_eq!(fields[1].str_prop(keys::LABEL), Some("Cost"));
        assert_eq!(fields[2].str_prop(keys::LABEL), Some(""));
        assert_eq!(fields[3].source(), None);
        assert_eq!(diagnostics.messages.len(), 1);
    }

    #[test]
    fn truthiness_matches_lock_semantics() {
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!("yes"))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(None));
    }
}
