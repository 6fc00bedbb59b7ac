//! Field normalization applied to every fetched item and file.
//!
//! One transform covers both item layouts: [`ItemShape::Flat`] spreads the
//! normalized record and overrides `id`, [`ItemShape::Legacy`] derives
//! `title`, `slug`, `content` and `date` and nests the record under `fields`.

use serde_json::Value;

use crate::model::{CollectionInfo, Item};
use crate::naming::camel_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Preserve,
    /// Top-level keys only.
    Shallow,
    /// Keys of nested objects too, including objects inside arrays.
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape {
    Flat,
    Legacy,
}

/// How the `id` of a record is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMode {
    Stringify,
    /// File library entries keep their id type.
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTransform {
    pub key_case: KeyCase,
    pub shape: ItemShape,
}

impl ItemTransform {
    pub fn apply(&self, item: &Item, id_mode: IdMode) -> Item {
        match self.shape {
            ItemShape::Flat => self.flat(item, id_mode),
            ItemShape::Legacy => self.legacy(item, id_mode),
        }
    }

    /// Converts a single key according to the configured case.
    pub fn key(&self, key: &str) -> String {
        match self.key_case {
            KeyCase::Preserve => key.to_string(),
            KeyCase::Shallow | KeyCase::Deep => camel_case(key),
        }
    }

    fn convert_keys(&self, item: &Item) -> Item {
        match self.key_case {
            KeyCase::Preserve => item.clone(),
            KeyCase::Shallow => rename_keys(item, Value::clone),
            KeyCase::Deep => rename_keys(item, camel_value),
        }
    }

    fn flat(&self, item: &Item, id_mode: IdMode) -> Item {
        let mut normalized = self.convert_keys(item);
        if let Some(id) = normalized.get("id").cloned() {
            normalized.insert("id".to_string(), normalize_id(&id, id_mode));
        }
        normalized
    }

    fn legacy(&self, item: &Item, id_mode: IdMode) -> Item {
        let fields = self.convert_keys(item);
        let id = fields.get("id").cloned().unwrap_or(Value::Null);
        let title = truthy(item, "title")
            .cloned()
            .unwrap_or_else(|| Value::String(id_string(&id)));
        let date = truthy(item, "created_on")
            .or_else(|| truthy(item, "updated_on"))
            .cloned()
            .unwrap_or(Value::Null);

        let mut out = Item::new();
        out.insert("title".to_string(), title);
        out.insert("id".to_string(), normalize_id(&id, id_mode));
        out.insert(
            "slug".to_string(),
            truthy(item, "slug").cloned().unwrap_or(Value::Null),
        );
        out.insert(
            "content".to_string(),
            truthy(item, "content").cloned().unwrap_or(Value::Null),
        );
        out.insert("date".to_string(), date);
        out.insert("fields".to_string(), Value::Object(fields));
        out
    }
}

/// Renames every key to camelCase. When two keys land on the same name, the
/// key that was already camelCase keeps its value; among renamed keys the last
/// one in key order wins.
fn rename_keys(map: &Item, convert: impl Fn(&Value) -> Value) -> Item {
    let (exact, renamed): (Vec<_>, Vec<_>) =
        map.iter().partition(|(key, _)| camel_case(key) == **key);
    renamed
        .into_iter()
        .chain(exact)
        .map(|(key, value)| (camel_case(key), convert(value)))
        .collect()
}

fn camel_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(rename_keys(map, camel_value)),
        Value::Array(values) => Value::Array(values.iter().map(camel_value).collect()),
        other => other.clone(),
    }
}

fn normalize_id(id: &Value, id_mode: IdMode) -> Value {
    match id_mode {
        IdMode::Stringify => Value::String(id_string(id)),
        IdMode::Preserve => id.clone(),
    }
}

/// String form of an id: strings as-is, anything else as its JSON text.
pub fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy<'a>(item: &'a Item, key: &str) -> Option<&'a Value> {
    item.get(key).filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Node keys of the collection's fields typed `file`.
pub fn file_fields(info: &CollectionInfo, key_case: KeyCase) -> Vec<String> {
    let transform = ItemTransform {
        key_case,
        shape: ItemShape::Flat,
    };
    info.fields
        .values()
        .filter(|descriptor| descriptor.is_file())
        .map(|descriptor| transform.key(&descriptor.field))
        .collect()
}
