use directus_source::model::{CollectionInfo, Item};
use directus_source::transform::{file_fields, IdMode, ItemShape, ItemTransform, KeyCase};
use serde_json::{json, Value};

fn item(value: Value) -> Item {
    match value {
        Value::Object(map) => map,
        other => panic!("test item must be an object, got {other}"),
    }
}

fn flat(key_case: KeyCase) -> ItemTransform {
    ItemTransform {
        key_case,
        shape: ItemShape::Flat,
    }
}

fn assert_camel_keys(value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                assert!(!key.contains('_') && !key.contains('-'), "key {key} not camelCase");
                assert_camel_keys(nested);
            }
        }
        Value::Array(values) => values.iter().for_each(assert_camel_keys),
        _ => {}
    }
}

#[test]
fn test_flat_deep_converts_nested_keys_and_stringifies_id() {
    let raw = item(json!({
        "id": 7,
        "created_on": "2020-01-01",
        "hero_image": { "file_name": "a.png", "meta_data": [{ "alt_text": "x" }] },
    }));

    let out = flat(KeyCase::Deep).apply(&raw, IdMode::Stringify);

    assert_eq!(out["id"], json!("7"));
    assert_eq!(out["createdOn"], json!("2020-01-01"));
    assert_eq!(out["heroImage"]["fileName"], json!("a.png"));
    assert_eq!(out["heroImage"]["metaData"][0]["altText"], json!("x"));
    assert_camel_keys(&Value::Object(out));
}

#[test]
fn test_flat_shallow_converts_top_level_only() {
    let raw = item(json!({ "id": "a1", "hero_image": { "file_name": "a.png" } }));

    let out = flat(KeyCase::Shallow).apply(&raw, IdMode::Stringify);

    assert_eq!(out["heroImage"]["file_name"], json!("a.png"));
    assert!(out.get("hero_image").is_none());
}

#[test]
fn test_preserve_keeps_keys_but_still_stringifies_id() {
    let raw = item(json!({ "id": 3, "created_on": null }));

    let out = flat(KeyCase::Preserve).apply(&raw, IdMode::Stringify);

    assert_eq!(out["id"], json!("3"));
    assert!(out.contains_key("created_on"));
}

#[test]
fn test_file_ids_keep_their_type() {
    let raw = item(json!({ "id": 12, "filename_disk": "abc.jpg" }));

    let out = flat(KeyCase::Deep).apply(&raw, IdMode::Preserve);

    assert_eq!(out["id"], json!(12));
    assert_eq!(out["filenameDisk"], json!("abc.jpg"));
}

#[test]
fn test_missing_id_is_not_invented() {
    let raw = item(json!({ "name": "no id" }));
    let out = flat(KeyCase::Deep).apply(&raw, IdMode::Stringify);
    assert!(out.get("id").is_none());
}

#[test]
fn test_id_from_differently_cased_key_is_stringified() {
    for key in ["ID", "Id"] {
        let mut raw = Item::new();
        raw.insert(key.to_string(), json!(5));

        let out = flat(KeyCase::Deep).apply(&raw, IdMode::Stringify);

        assert_eq!(out.get("id"), Some(&json!("5")), "id from key {key}");
        assert!(out.get(key).is_none());
    }

    let legacy = ItemTransform {
        key_case: KeyCase::Shallow,
        shape: ItemShape::Legacy,
    };
    let out = legacy.apply(&item(json!({ "ID": 9 })), IdMode::Stringify);
    assert_eq!(out["id"], json!("9"));
    assert_eq!(out["title"], json!("9"));
}

#[test]
fn test_colliding_keys_keep_the_already_camel_case_value() {
    let raw = item(json!({
        "created_on": "from snake",
        "createdOn": "from camel",
        "nested": { "alt_text": "snake", "altText": "camel" },
    }));

    let out = flat(KeyCase::Deep).apply(&raw, IdMode::Stringify);

    assert_eq!(out.len(), 2);
    assert_eq!(out["createdOn"], json!("from camel"));
    assert_eq!(out["nested"], json!({ "altText": "camel" }));
    assert_camel_keys(&Value::Object(out));
}

#[test]
fn test_plain_id_wins_over_uppercase_id() {
    let raw = item(json!({ "ID": 1, "id": 2 }));

    let out = flat(KeyCase::Shallow).apply(&raw, IdMode::Stringify);

    assert_eq!(out.len(), 1);
    assert_eq!(out["id"], json!("2"));
}

#[test]
fn test_transforming_camel_case_item_again_is_stable() {
    let raw = item(json!({ "id": 5, "created_on": "x", "nested_obj": { "inner_key": 1 } }));
    let transform = flat(KeyCase::Deep);

    let once = transform.apply(&raw, IdMode::Stringify);
    let twice = transform.apply(&once, IdMode::Stringify);

    assert_eq!(once, twice);
}

#[test]
fn test_legacy_shape_derives_fallback_fields() {
    let raw = item(json!({ "id": 5, "created_on": "2020-01-01", "title": null }));
    let transform = ItemTransform {
        key_case: KeyCase::Deep,
        shape: ItemShape::Legacy,
    };

    let out = transform.apply(&raw, IdMode::Stringify);

    assert_eq!(out["title"], json!("5"));
    assert_eq!(out["id"], json!("5"));
    assert_eq!(out["date"], json!("2020-01-01"));
    assert_eq!(out["slug"], Value::Null);
    assert_eq!(out["content"], Value::Null);
    assert_eq!(out["fields"]["id"], json!(5));
    assert_eq!(out["fields"]["createdOn"], json!("2020-01-01"));
}

#[test]
fn test_legacy_date_falls_back_to_updated_on() {
    let raw = item(json!({
        "id": "p1",
        "title": "Hello",
        "slug": "hello",
        "created_on": "",
        "updated_on": "2021-05-05",
    }));
    let transform = ItemTransform {
        key_case: KeyCase::Preserve,
        shape: ItemShape::Legacy,
    };

    let out = transform.apply(&raw, IdMode::Stringify);

    assert_eq!(out["title"], json!("Hello"));
    assert_eq!(out["slug"], json!("hello"));
    assert_eq!(out["date"], json!("2021-05-05"));
    assert_eq!(out["fields"]["updated_on"], json!("2021-05-05"));
}

#[test]
fn test_file_fields_lists_converted_file_typed_fields() {
    let info: CollectionInfo = serde_json::from_value(json!({
        "collection": "posts",
        "fields": {
            "id": { "field": "id", "type": "integer" },
            "cover_image": { "field": "cover_image", "type": "file" },
            "body": { "field": "body", "type": null },
        }
    }))
    .expect("collection info parses");

    assert_eq!(file_fields(&info, KeyCase::Deep), vec!["coverImage".to_string()]);
    assert_eq!(file_fields(&info, KeyCase::Preserve), vec!["cover_image".to_string()]);
}
