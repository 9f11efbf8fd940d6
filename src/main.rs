use arrayinput::prelude::*;
use serde_json::json;

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> AppResult<()> {
    let records = json!([
        {"title": "Dune", "author": {"name": "Frank Herbert"}, "price": 12.5, "locked": true},
        {"title": "Hyperion", "author": {"name": "Dan Simmons"}, "price": 9.0, "locked": false},
        {"title": "Solaris", "author": {"name": "Stanisław Lem"}, "price": 11.0, "locked": false}
    ]);

    let messages = MessageCatalog::from_value(
        "en",
        &json!({
            "resources": {
                "orders": {
                    "fields": {
                        "books": {
                            "title": "Book title",
                            "author": {"name": "Written by"}
                        }
                    }
                }
            }
        }),
    );

    let state = SharedArrayInput::new(arrayinput::ArrayInputState::from_value("books", &records));
    let options = IteratorOptions::new()
        .with_resource("orders")
        .with_item_label(|index| format!("Book {}", index + 1))
        .with_disable_remove(DisableRemove::predicate(|record| {
            record["locked"].as_bool().unwrap_or(false)
        }))
        .with_field(Element::new("TextInput").with_source("title"))
        .with_field(Element::new("TextInput").with_source("author.name"))
        .with_field(Element::new("NumberInput").with_source("price"));

    let value = ArrayInputUI::new(FormIterator::new(state, options))
        .with_translator(messages)
        .with_title("Order books")
        .run()?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
