//! In-memory [`ContentStore`] that keeps everything it is given.
//!
//! Useful as a host for dumps and tests. It is strict about declaration order:
//! references to undeclared types and calls with unknown handles are errors.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::contract::{ContentStore, ContentTypeHandle, ContentTypeSpec};
use crate::error::StoreError;
use crate::model::Item;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    pub field: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentTypeRecord {
    pub type_name: String,
    pub route: Option<String>,
    pub references: Vec<ReferenceRecord>,
    pub nodes: Vec<Item>,
}

/// One store call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    ContentType {
        type_name: String,
    },
    Reference {
        type_name: String,
        field: String,
        target: String,
    },
    Node {
        type_name: String,
        id: Option<serde_json::Value>,
    },
}

#[derive(Debug, Default, Serialize)]
pub struct MemoryStore {
    types: BTreeMap<String, ContentTypeRecord>,
    events: Vec<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(&self, type_name: &str) -> Option<&ContentTypeRecord> {
        self.types.get(type_name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    pub fn node_count(&self) -> usize {
        self.types.values().map(|t| t.nodes.len()).sum()
    }

    fn record_mut(&mut self, handle: &ContentTypeHandle) -> Result<&mut ContentTypeRecord, StoreError> {
        self.types
            .get_mut(handle.type_name())
            .ok_or_else(|| format!("unknown content type handle: {}", handle.type_name()).into())
    }
}

impl ContentStore for MemoryStore {
    fn add_content_type(&mut self, spec: ContentTypeSpec) -> Result<ContentTypeHandle, StoreError> {
        if self.types.contains_key(&spec.type_name) {
            return Err(format!("content type {} is already declared", spec.type_name).into());
        }
        self.events.push(StoreEvent::ContentType {
            type_name: spec.type_name.clone(),
        });
        let handle = ContentTypeHandle::new(&spec.type_name);
        self.types.insert(
            spec.type_name.clone(),
            ContentTypeRecord {
                type_name: spec.type_name,
                route: spec.route,
                references: Vec::new(),
                nodes: Vec::new(),
            },
        );
        Ok(handle)
    }

    fn add_reference(
        &mut self,
        content_type: &ContentTypeHandle,
        field: &str,
        target_type: &str,
    ) -> Result<(), StoreError> {
        if !self.types.contains_key(target_type) {
            return Err(format!("reference target {target_type} is not declared").into());
        }
        self.record_mut(content_type)?.references.push(ReferenceRecord {
            field: field.to_string(),
            target: target_type.to_string(),
        });
        self.events.push(StoreEvent::Reference {
            type_name: content_type.type_name().to_string(),
            field: field.to_string(),
            target: target_type.to_string(),
        });
        Ok(())
    }

    fn add_node(&mut self, content_type: &ContentTypeHandle, node: Item) -> Result<(), StoreError> {
        let id = node.get("id").cloned();
        self.record_mut(content_type)?.nodes.push(node);
        self.events.push(StoreEvent::Node {
            type_name: content_type.type_name().to_string(),
            id,
        });
        Ok(())
    }
}
