use std::{fmt, rc::Rc};

use serde_json::{Map, Value};

use super::{
    item::{DisableRemove, FormIteratorItem, ItemLabelFn, ItemProps, RenderedItem},
    state::SharedArrayInput,
};
use crate::element::{Element, Node};
use crate::i18n::Translator;

/// Settings shared by every row of one array field.
#[derive(Clone, Default)]
pub struct IteratorOptions {
    pub resource: String,
    pub disabled: bool,
    pub disable_add: bool,
    pub disable_remove: Option<DisableRemove>,
    pub disable_reordering: bool,
    pub get_item_label: Option<ItemLabelFn>,
    pub remove_button: Option<Element>,
    pub reorder_buttons: Option<Element>,
    pub children: Vec<Node>,
}

impl IteratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_disable_add(mut self, disable: bool) -> Self {
        self.disable_add = disable;
        self
    }

    pub fn with_disable_remove(mut self, disable: impl Into<DisableRemove>) -> Self {
        self.disable_remove = Some(disable.into());
        self
    }

    pub fn with_disable_reordering(mut self, disable: bool) -> Self {
        self.disable_reordering = disable;
        self
    }

    pub fn with_item_label(mut self, label: impl Fn(usize) -> String + 'static) -> Self {
        self.get_item_label = Some(Rc::new(label));
        self
    }

    pub fn with_remove_button(mut self, button: Element) -> Self {
        self.remove_button = Some(button);
        self
    }

    pub fn with_reorder_buttons(mut self, buttons: Element) -> Self {
        self.reorder_buttons = Some(buttons);
        self
    }

    pub fn with_field(mut self, field: impl Into<Node>) -> Self {
        self.children.push(field.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<Node>) -> Self {
        self.children = fields;
        self
    }
}

impl fmt::Debug for IteratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IteratorOptions")
            .field("resource", &self.resource)
            .field("disabled", &self.disabled)
            .field("disable_add", &self.disable_add)
            .field("disable_remove", &self.disable_remove)
            .field("disable_reordering", &self.disable_reordering)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Renders every record of an array field as a row.
#[derive(Debug, Clone)]
pub struct FormIterator {
    state: SharedArrayInput,
    options: IteratorOptions,
}

impl FormIterator {
    pub fn new(state: SharedArrayInput, options: IteratorOptions) -> Self {
        Self { state, options }
    }

    pub fn state(&self) -> &SharedArrayInput {
        &self.state
    }

    pub fn options(&self) -> &IteratorOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    pub fn can_add(&self) -> bool {
        !self.options.disabled && !self.options.disable_add
    }

    pub fn item_props(&self, index: usize) -> Option<ItemProps> {
        let state = self.state.borrow();
        let record = state.record(index)?.clone();
        let options = &self.options;
        Some(ItemProps {
            index,
            member: state.member(index),
            record,
            children: options.children.clone(),
            disabled: options.disabled,
            disable_reordering: options.disable_reordering,
            disable_remove: options.disable_remove.clone(),
            get_item_label: options.get_item_label.clone(),
            remove_button: options.remove_button.clone(),
            reorder_buttons: options.reorder_buttons.clone(),
            resource: options.resource.clone(),
            source: state.source().to_string(),
        })
    }

    pub fn render(&self, translator: &dyn Translator) -> Vec<RenderedItem> {
        let renderer = FormIteratorItem::new(self.state.as_context(), translator);
        (0..self.len())
            .filter_map(|index| self.item_props(index))
            .map(|props| renderer.render(&props))
            .collect()
    }

    /// Appends a blank record shaped after the field template.
    pub fn add(&self) -> Option<usize> {
        if !self.can_add() {
            return None;
        }
        let record = blank_record(&self.options.children);
        Some(self.state.borrow_mut().push(record))
    }
}

/// Keys for every sourced field, or `null` when rows hold bare values.
fn blank_record(children: &[Node]) -> Value {
    let sources: Vec<&str> = children
        .iter()
        .filter_map(Node::as_element)
        .filter_map(Element::source)
        .collect();
    if sources.is_empty() {
        return Value::Null;
    }
    let mut record = Value::Object(Map::new());
    for source in sources {
        insert_path(&mut record, source);
    }
    record
}

/// Creates `null` leaves along `path`. Numeric segments become array slots.
fn insert_path(target: &mut Value, path: &str) {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let slot = match array_slot(head) {
        Some(index) => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            let Value::Array(items) = target else {
                return;
            };
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        None => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            let Value::Object(map) = target else {
                return;
            };
            map.entry(head.to_string()).or_insert(Value::Null)
        }
    };
    if let Some(rest) = rest {
        insert_path(slot, rest);
    }
}

fn array_slot(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
