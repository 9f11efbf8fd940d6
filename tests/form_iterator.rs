use arrayinput::element::keys;
use arrayinput::iterator::{ReorderDirection, trigger_reorder};
use arrayinput::{
    ArrayInputState, ClickEvent, DisableRemove, Element, FormIterator, IdentityTranslator,
    IteratorOptions, MessageCatalog, SharedArrayInput,
};
use serde_json::json;

fn library() -> FormIterator {
    let state = SharedArrayInput::new(ArrayInputState::from_value(
        "items",
        &json!([
            {"title": "Dune", "locked": true},
            {"title": "Emma", "locked": false},
            {"title": "Ubik", "locked": false}
        ]),
    ));
    let options = IteratorOptions::new()
        .with_resource("books")
        .with_disable_remove(DisableRemove::predicate(|record| {
            record["locked"] == json!(true)
        }))
        .with_field(Element::new("TextInput").with_source("title"));
    FormIterator::new(state, options)
}

fn titles(iterator: &FormIterator) -> Vec<String> {
    iterator
        .state()
        .borrow()
        .records()
        .iter()
        .map(|record| record["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn renders_one_row_per_record_with_catalog_labels() {
    let iterator = library();
    let catalog = MessageCatalog::from_value(
        "en",
        &json!({"resources": {"books": {"fields": {"items": {"title": "Book title"}}}}}),
    );

    let rows = iterator.render(&catalog);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].member, "items.1");
    assert_eq!(rows[1].fields[0].source(), Some("items.1.title"));
    assert_eq!(rows[1].fields[0].str_prop(keys::LABEL), Some("Book title"));
    assert!(!rows[0].can_remove());
    assert!(rows[1].can_remove());
}

#[test]
fn remove_click_drops_the_record_from_the_list() {
    let iterator = library();
    let rows = iterator.render(&IdentityTranslator);

    assert!(rows[1].click_remove(&ClickEvent::default()));
    assert_eq!(titles(&iterator), ["Dune", "Ubik"]);
    assert!(iterator.state().borrow().is_dirty());
}

#[test]
fn reorder_controls_move_records() {
    let iterator = library();
    let rows = iterator.render(&IdentityTranslator);

    let control = rows[2].reorder_buttons.as_ref().unwrap();
    assert!(trigger_reorder(control, ReorderDirection::Up));
    assert_eq!(titles(&iterator), ["Dune", "Ubik", "Emma"]);

    let first = rows[0].reorder_buttons.as_ref().unwrap();
    assert!(!trigger_reorder(first, ReorderDirection::Up));
}

#[test]
fn item_context_moves_its_own_row() {
    let iterator = library();
    let rows = iterator.render(&IdentityTranslator);

    rows[0].context.reorder(2);
    assert_eq!(titles(&iterator), ["Emma", "Ubik", "Dune"]);
    assert_eq!(rows[0].context.total(), 3);
}

#[test]
fn add_appends_a_blank_record_shaped_by_fields() {
    let iterator = library();
    assert_eq!(iterator.add(), Some(3));
    assert_eq!(
        iterator.state().borrow().record(3),
        Some(&json!({"title": null}))
    );

    let locked = FormIterator::new(
        SharedArrayInput::default(),
        IteratorOptions::new().with_disable_add(true),
    );
    assert_eq!(locked.add(), None);
    assert!(locked.is_empty());
}

#[test]
fn disabled_list_renders_read_only_rows() {
    let state = SharedArrayInput::new(ArrayInputState::new("tags", vec![json!("a"), json!("b")]));
    let iterator = FormIterator::new(
        state,
        IteratorOptions::new()
            .with_disabled(true)
            .with_field(Element::new("TextInput")),
    );

    let rows = iterator.render(&IdentityTranslator);
    assert!(rows.iter().all(|row| !row.can_remove() && !row.can_reorder()));
    assert_eq!(rows[1].fields[0].source(), Some("tags.1"));
    assert_eq!(rows[1].fields[0].bool_prop(keys::DISABLED), Some(true));
    assert!(!iterator.can_add());
}
