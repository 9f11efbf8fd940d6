use std::{fmt, rc::Rc};

use serde_json::Value;

use super::{
    buttons,
    context::{ItemContext, IteratorContext},
};
use crate::element::{ClickEvent, Element, Node, PropPatch, PropValue, class_names, keys};
use crate::i18n::{LabelQuery, Translator, field_label_translation_args};

pub type ItemLabelFn = Rc<dyn Fn(usize) -> String>;
pub type RemovePredicate = Rc<dyn Fn(&Value) -> bool>;

/// Whether a row's remove control is withheld.
#[derive(Clone)]
pub enum DisableRemove {
    Bool(bool),
    Predicate(RemovePredicate),
}

impl DisableRemove {
    pub fn predicate(predicate: impl Fn(&Value) -> bool + 'static) -> Self {
        DisableRemove::Predicate(Rc::new(predicate))
    }

    pub fn applies_to(&self, record: &Value) -> bool {
        match self {
            DisableRemove::Bool(flag) => *flag,
            DisableRemove::Predicate(predicate) => predicate(record),
        }
    }
}

impl From<bool> for DisableRemove {
    fn from(flag: bool) -> Self {
        DisableRemove::Bool(flag)
    }
}

impl fmt::Debug for DisableRemove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisableRemove::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            DisableRemove::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

/// An unset setting never disables removal.
pub fn disable_remove_field(disable_remove: Option<&DisableRemove>, record: &Value) -> bool {
    disable_remove.is_some_and(|setting| setting.applies_to(record))
}

pub fn default_item_label(index: usize) -> String {
    (index + 1).to_string()
}

#[derive(Clone)]
pub struct ItemProps {
    pub index: usize,
    pub member: String,
    pub record: Value,
    pub children: Vec<Node>,
    pub disabled: bool,
    pub disable_reordering: bool,
    pub disable_remove: Option<DisableRemove>,
    pub get_item_label: Option<ItemLabelFn>,
    pub remove_button: Option<Element>,
    pub reorder_buttons: Option<Element>,
    pub resource: String,
    pub source: String,
}

impl ItemProps {
    pub fn new(index: usize, member: impl Into<String>, record: Value) -> Self {
        Self {
            index,
            member: member.into(),
            record,
            children: Vec::new(),
            disabled: false,
            disable_reordering: false,
            disable_remove: None,
            get_item_label: None,
            remove_button: None,
            reorder_buttons: None,
            resource: String::new(),
            source: String::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_disable_reordering(mut self, disable: bool) -> Self {
        self.disable_reordering = disable;
        self
    }

    pub fn with_disable_remove(mut self, disable: impl Into<DisableRemove>) -> Self {
        self.disable_remove = Some(disable.into());
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

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn item_label(&self) -> String {
        match &self.get_item_label {
            Some(label) => label(self.index),
            None => default_item_label(self.index),
        }
    }
}

impl fmt::Debug for ItemProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemProps")
            .field("index", &self.index)
            .field("member", &self.member)
            .field("record", &self.record)
            .field("children", &self.children)
            .field("disabled", &self.disabled)
            .field("disable_reordering", &self.disable_reordering)
            .field("disable_remove", &self.disable_remove)
            .field("resource", &self.resource)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Output of one row render.
#[derive(Debug, Clone)]
pub struct RenderedItem {
    pub index: usize,
    pub member: String,
    pub record: Value,
    pub label: String,
    pub reorder_buttons: Option<Element>,
    pub fields: Vec<Element>,
    pub remove_button: Option<Element>,
    pub context: ItemContext,
}

impl RenderedItem {
    pub fn can_remove(&self) -> bool {
        self.remove_button.is_some()
    }

    pub fn can_reorder(&self) -> bool {
        self.reorder_buttons.is_some()
    }

    /// Activates the remove control. Returns `false` when it is hidden.
    pub fn click_remove(&self, event: &ClickEvent) -> bool {
        self.remove_button
            .as_ref()
            .is_some_and(|button| button.click(event))
    }
}

/// Renders rows of one array field.
pub struct FormIteratorItem<'a> {
    parent: Rc<dyn IteratorContext>,
    translator: &'a dyn Translator,
}

impl<'a> FormIteratorItem<'a> {
    pub fn new(parent: Rc<dyn IteratorContext>, translator: &'a dyn Translator) -> Self {
        Self { parent, translator }
    }

    pub fn render(&self, props: &ItemProps) -> RenderedItem {
        let total = self.parent.total();
        let parent_source = self.parent.source();
        let show_remove =
            !props.disabled && !disable_remove_field(props.disable_remove.as_ref(), &props.record);
        let show_reorder = !props.disabled && !props.disable_reordering;

        let fields: Vec<Element> = props
            .children
            .iter()
            .enumerate()
            .filter_map(|(position, node)| {
                let input = node.as_element()?;
                Some(self.scope_field(input, position, props, &parent_source))
            })
            .collect();

        let reorder_buttons = show_reorder.then(|| self.reorder_control(props, total));
        let remove_button = show_remove.then(|| self.remove_control(props));

        tracing::trace!(
            member = %props.member,
            fields = fields.len(),
            removable = show_remove,
            reorderable = show_reorder,
            "rendered item"
        );

        RenderedItem {
            index: props.index,
            member: props.member.clone(),
            record: props.record.clone(),
            label: props.item_label(),
            reorder_buttons,
            fields,
            remove_button,
            context: ItemContext::new(Rc::clone(&self.parent), props.index),
        }
    }

    /// Points a child input at its slot inside this row.
    ///
    /// Props the child sets itself (other than `source`) take precedence over
    /// the computed ones.
    fn scope_field(
        &self,
        input: &Element,
        position: usize,
        props: &ItemProps,
        parent_source: &str,
    ) -> Element {
        let own_source = input.source();
        let mut patch = PropPatch::new();
        match own_source {
            Some(source) => {
                patch.set(keys::SOURCE, format!("{}.{source}", props.member));
            }
            None => {
                patch.set(keys::SOURCE, props.member.clone());
                patch.set(keys::INDEX, position);
            }
        }
        // Inference on the scoped path (`items.2.name`) would produce a
        // meaningless key, so labels are resolved from the relative source.
        if !input.has_prop(keys::LABEL) {
            let query = LabelQuery {
                label: None,
                parent_source: Some(parent_source),
                resource: Some(&props.resource),
                source: own_source,
            };
            let (key, args) = field_label_translation_args(&query);
            patch.set(keys::LABEL, self.translator.translate(&key, &args));
        }
        patch.set(keys::DISABLED, props.disabled);
        for (key, value) in input.props() {
            if key != keys::SOURCE {
                patch.set(key.clone(), value.clone());
            }
        }
        input.clone_with(&patch)
    }

    fn reorder_control(&self, props: &ItemProps, total: usize) -> Element {
        let control = props
            .reorder_buttons
            .clone()
            .unwrap_or_else(buttons::reorder_buttons);
        let parent = Rc::clone(&self.parent);
        let scoped_class = format!("{}-{}-{}", buttons::REORDER_CLASS, props.source, props.index);
        let class_name = class_names([buttons::REORDER_CLASS, scoped_class.as_str()]);
        let mut patch = PropPatch::new();
        patch
            .set(keys::INDEX, props.index)
            .set(keys::MAX, total)
            .set(
                keys::REORDER,
                PropValue::reorder(move |from, to| parent.reorder(from, to)),
            )
            .set(keys::CLASS_NAME, class_name);
        control.clone_with(&patch)
    }

    fn remove_control(&self, props: &ItemProps) -> Element {
        let control = props
            .remove_button
            .clone()
            .unwrap_or_else(buttons::remove_button);
        let original = control.on_click();
        let parent = Rc::clone(&self.parent);
        let index = props.index;
        let scoped_class = format!("{}-{}-{}", buttons::REMOVE_CLASS, props.source, props.index);
        let class_name = class_names([buttons::REMOVE_CLASS, scoped_class.as_str()]);
        let mut patch = PropPatch::new();
        patch
            .set(
                keys::ON_CLICK,
                PropValue::click(move |event| {
                    parent.remove(index);
                    if let Some(original) = &original {
                        original(event);
                    }
                }),
            )
            .set(keys::CLASS_NAME, class_name);
        control.clone_with(&patch)
    }
}
