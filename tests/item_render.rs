use std::{cell::RefCell, rc::Rc};

use arrayinput::element::keys;
use arrayinput::iterator::{ReorderDirection, disable_remove_field, trigger_reorder};
use arrayinput::{
    ClickEvent, DisableRemove, Element, FormIteratorItem, ItemProps, IteratorContext, Node,
    TranslationArgs,
};
use serde_json::{Value, json};

struct Parent {
    total: usize,
    log: Rc<RefCell<Vec<String>>>,
}

impl IteratorContext for Parent {
    fn source(&self) -> String {
        "items".to_string()
    }

    fn total(&self) -> usize {
        self.total
    }

    fn reorder(&self, from: usize, to: usize) {
        self.log.borrow_mut().push(format!("reorder {from} {to}"));
    }

    fn remove(&self, index: usize) {
        self.log.borrow_mut().push(format!("remove {index}"));
    }
}

fn parent(total: usize) -> (Rc<dyn IteratorContext>, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let parent = Parent {
        total,
        log: Rc::clone(&log),
    };
    (Rc::new(parent), log)
}

/// Echoes the lookup so assertions can see exactly what was asked for.
fn echo(key: &str, args: &TranslationArgs) -> String {
    format!("{key}|{}", Value::Object(args.clone()))
}

fn book_row(index: usize) -> ItemProps {
    ItemProps::new(index, format!("items.{index}"), json!({"name": "Dune", "locked": false}))
        .with_resource("books")
        .with_source("items")
}

#[test]
fn boolean_disable_remove_ignores_the_record() {
    for flag in [true, false] {
        for record in [json!({}), json!({"locked": true}), json!(null)] {
            assert_eq!(
                disable_remove_field(Some(&DisableRemove::from(flag)), &record),
                flag
            );
        }
    }
}

#[test]
fn predicate_disable_remove_follows_the_record() {
    let locked = DisableRemove::predicate(|record| record["locked"] == json!(true));
    assert!(disable_remove_field(Some(&locked), &json!({"locked": true})));
    assert!(!disable_remove_field(Some(&locked), &json!({"locked": false})));
    assert!(!disable_remove_field(None, &json!({"locked": true})));
}

#[test]
fn children_are_scoped_under_the_member_path() {
    let (parent, _) = parent(3);
    let item = FormIteratorItem::new(parent, &echo);
    let props = ItemProps::new(2, "items.2", json!({"name": "Emma"}))
        .with_child(Element::new("TextInput").with_source("name"))
        .with_child(Element::new("TextInput"))
        .with_child(Element::new("TextInput"));

    let rendered = item.render(&props);
    assert_eq!(rendered.fields[0].source(), Some("items.2.name"));
    assert_eq!(rendered.fields[0].int_prop(keys::INDEX), None);
    assert_eq!(rendered.fields[1].source(), Some("items.2"));
    assert_eq!(rendered.fields[1].int_prop(keys::INDEX), Some(1));
    assert_eq!(rendered.fields[2].int_prop(keys::INDEX), Some(2));
}

#[test]
fn blank_labels_are_kept_and_others_are_translated() {
    let (parent, _) = parent(1);
    let item = FormIteratorItem::new(parent, &echo);
    let props = book_row(0)
        .with_child(Element::new("TextInput").with_source("name").with_label(""))
        .with_child(Element::new("TextInput").with_source("isbn").with_label(false))
        .with_child(Element::new("TextInput").with_source("name"));

    let rendered = item.render(&props);
    assert_eq!(rendered.fields[0].str_prop(keys::LABEL), Some(""));
    assert_eq!(rendered.fields[1].bool_prop(keys::LABEL), Some(false));
    assert_eq!(
        rendered.fields[2].str_prop(keys::LABEL),
        Some(r#"resources.books.fields.items.name|{"_":"Name"}"#)
    );
}

#[test]
fn explicit_labels_pass_through_untranslated() {
    let (parent, _) = parent(1);
    let item = FormIteratorItem::new(parent, &echo);
    let props = book_row(0)
        .with_child(Element::new("TextInput").with_source("name").with_label("Custom"))
        .with_child(Element::new("TextInput").with_label("Whole value"));

    let rendered = item.render(&props);
    assert_eq!(rendered.fields[0].str_prop(keys::LABEL), Some("Custom"));
    assert_eq!(rendered.fields[1].str_prop(keys::LABEL), Some("Whole value"));
    assert_eq!(rendered.fields[1].source(), Some("items.0"));
}

#[test]
fn explicit_index_survives_scoping() {
    let (parent, _) = parent(3);
    let item = FormIteratorItem::new(parent, &echo);
    let props = ItemProps::new(2, "items.2", json!({"name": "Emma"}))
        .with_child(
            Element::new("TextInput")
                .with_source("name")
                .with_prop(keys::INDEX, 7usize),
        )
        .with_child(Node::Empty)
        .with_child(Element::new("TextInput").with_source(""));

    let rendered = item.render(&props);
    assert_eq!(rendered.fields[0].source(), Some("items.2.name"));
    assert_eq!(rendered.fields[0].int_prop(keys::INDEX), Some(7));
    assert_eq!(rendered.fields[1].source(), Some("items.2"));
    assert_eq!(rendered.fields[1].int_prop(keys::INDEX), Some(2));
    assert_eq!(rendered.fields[1].str_prop(keys::LABEL), Some("|{}"));
}

#[test]
fn disabled_flows_to_fields_unless_the_field_sets_it() {
    let (parent, _) = parent(1);
    let item = FormIteratorItem::new(parent, &echo);
    let props = book_row(0)
        .with_disabled(true)
        .with_child(Element::new("TextInput").with_source("name"))
        .with_child(
            Element::new("TextInput")
                .with_source("note")
                .with_prop(keys::DISABLED, false),
        );

    let rendered = item.render(&props);
    assert_eq!(rendered.fields[0].bool_prop(keys::DISABLED), Some(true));
    assert_eq!(rendered.fields[1].bool_prop(keys::DISABLED), Some(false));
}

#[test]
fn remove_click_reaches_the_parent_before_the_original_handler() {
    let (parent, log) = parent(3);
    let item = FormIteratorItem::new(parent, &echo);
    let handler_log = Rc::clone(&log);
    let button = Element::new("RemoveItemButton")
        .with_on_click(move |_| handler_log.borrow_mut().push("original".to_string()));

    let rendered = item.render(&book_row(1).with_remove_button(button));
    assert!(rendered.click_remove(&ClickEvent::default()));
    assert_eq!(*log.borrow(), ["remove 1", "original"]);
}

#[test]
fn remove_control_is_withheld_for_locked_or_disabled_rows() {
    let (parent, log) = parent(2);
    let item = FormIteratorItem::new(parent, &echo);
    let locked = book_row(0).with_disable_remove(DisableRemove::predicate(|record| {
        record["name"] == json!("Dune")
    }));
    let disabled = book_row(1).with_disabled(true);

    for props in [locked, disabled] {
        let rendered = item.render(&props);
        assert!(!rendered.can_remove());
        assert!(!rendered.click_remove(&ClickEvent::default()));
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn reorder_control_carries_position_and_bounds() {
    let (parent, log) = parent(5);
    let item = FormIteratorItem::new(parent, &echo);
    let rendered = item.render(&book_row(3));

    let control = rendered.reorder_buttons.as_ref().unwrap();
    assert_eq!(control.int_prop(keys::INDEX), Some(3));
    assert_eq!(control.int_prop(keys::MAX), Some(5));
    assert!(trigger_reorder(control, ReorderDirection::Up));
    assert_eq!(*log.borrow(), ["reorder 3 2"]);
}

#[test]
fn reorder_control_is_hidden_when_disabled_or_locked_in_place() {
    let (parent, _) = parent(2);
    let item = FormIteratorItem::new(parent, &echo);
    assert!(!item.render(&book_row(0).with_disabled(true)).can_reorder());
    assert!(!item.render(&book_row(0).with_disable_reordering(true)).can_reorder());
    assert!(item.render(&book_row(0)).can_reorder());
}

#[test]
fn controls_carry_predictable_class_names() {
    let (parent, _) = parent(4);
    let item = FormIteratorItem::new(parent, &echo);
    let rendered = item.render(&book_row(2));

    let reorder = rendered.reorder_buttons.as_ref().unwrap();
    let remove = rendered.remove_button.as_ref().unwrap();
    assert_eq!(
        reorder.class_name(),
        Some("button-reorder button-reorder-items-2")
    );
    assert_eq!(remove.class_name(), Some("button-remove button-remove-items-2"));
}

#[test]
fn non_element_children_are_skipped() {
    let (parent, _) = parent(1);
    let item = FormIteratorItem::new(parent, &echo);
    let props = book_row(0).with_children(vec![
        Node::Empty,
        Node::from("loose text"),
        Node::from(Element::new("TextInput").with_source("name")),
        Node::from(None::<Element>),
    ]);

    let rendered = item.render(&props);
    assert_eq!(rendered.fields.len(), 1);
    assert_eq!(rendered.fields[0].source(), Some("items.0.name"));
}

#[test]
fn item_label_defaults_to_one_based_position() {
    let (parent, _) = parent(3);
    let item = FormIteratorItem::new(parent, &echo);
    assert_eq!(item.render(&book_row(2)).label, "3");
    let custom = book_row(2).with_item_label(|index| format!("Book {index}"));
    assert_eq!(item.render(&custom).label, "Book 2");
}
