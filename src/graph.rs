//! Declares the content schema and inserts nodes into the host store.
//!
//! Order matters: `Files` first, then each collection with its file-field
//! references, then relation references, then file nodes, then item nodes. A
//! reference is only ever added once its target type has been declared.

use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, warn};

use crate::contract::{ContentStore, ContentTypeHandle, ContentTypeSpec};
use crate::error::SourceError;
use crate::model::{FetchedContent, Item};

/// Type name of the file library.
pub const FILES_TYPE: &str = "Files";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct GraphSummary {
    pub content_types: usize,
    pub references: usize,
    pub nodes: usize,
}

struct GraphBuilder<'s, S: ContentStore + ?Sized> {
    store: &'s mut S,
    handles: HashMap<String, ContentTypeHandle>,
    references: HashSet<(String, String, String)>,
    summary: GraphSummary,
}

impl<'s, S: ContentStore + ?Sized> GraphBuilder<'s, S> {
    fn declare(&mut self, spec: ContentTypeSpec) -> Result<ContentTypeHandle, SourceError> {
        let type_name = spec.type_name.clone();
        debug!(type_name = %type_name, route = ?spec.route, "Declaring content type");
        let handle = self
            .store
            .add_content_type(spec)
            .map_err(|source| SourceError::Store {
                operation: "add_content_type",
                source,
            })?;
        self.handles.insert(type_name, handle.clone());
        self.summary.content_types += 1;
        Ok(handle)
    }

    fn reference(
        &mut self,
        handle: &ContentTypeHandle,
        field: &str,
        target: &str,
    ) -> Result<(), SourceError> {
        let key = (
            handle.type_name().to_string(),
            field.to_string(),
            target.to_string(),
        );
        if !self.references.insert(key) {
            debug!(type_name = %handle.type_name(), field, target, "Reference already declared");
            return Ok(());
        }
        self.store
            .add_reference(handle, field, target)
            .map_err(|source| SourceError::Store {
                operation: "add_reference",
                source,
            })?;
        self.summary.references += 1;
        Ok(())
    }

    fn node(&mut self, handle: &ContentTypeHandle, node: Item) -> Result<(), SourceError> {
        self.store
            .add_node(handle, node)
            .map_err(|source| SourceError::Store {
                operation: "add_node",
                source,
            })?;
        self.summary.nodes += 1;
        Ok(())
    }
}

/// Declare one type per collection plus `Files`, wire references and insert
/// every file and item. Store errors propagate untouched.
pub fn build_graph<S>(
    content: &FetchedContent,
    routes: &HashMap<String, String>,
    store: &mut S,
) -> Result<GraphSummary, SourceError>
where
    S: ContentStore + ?Sized,
{
    info!("[DIRECTUS] 5. Setting up content schema");
    let mut builder = GraphBuilder {
        store,
        handles: HashMap::new(),
        references: HashSet::new(),
        summary: GraphSummary::default(),
    };

    let files = builder.declare(ContentTypeSpec::new(FILES_TYPE))?;

    let mut skipped = HashSet::new();
    for collection in &content.collections {
        if builder.handles.contains_key(&collection.type_name) {
            error!(collection = %collection.name, type_name = %collection.type_name, "[DIRECTUS][ERROR] Type already declared, skipping collection");
            skipped.insert(collection.name.as_str());
            continue;
        }
        let mut spec = ContentTypeSpec::new(&collection.type_name);
        if let Some(route) = routes.get(&collection.name) {
            spec = spec.with_route(route);
        }
        let handle = builder.declare(spec)?;
        for field in &collection.file_fields {
            builder.reference(&handle, field, FILES_TYPE)?;
        }
    }

    for relation in &content.relations {
        let Some(handle) = builder.handles.get(&relation.collection_many).cloned() else {
            warn!(collection = %relation.collection_many, field = %relation.field_many, "[DIRECTUS] Skipping relation from undeclared type");
            continue;
        };
        if !builder.handles.contains_key(&relation.collection_one) {
            warn!(collection = %relation.collection_one, field = %relation.field_many, "[DIRECTUS] Skipping relation to undeclared type");
            continue;
        }
        builder.reference(&handle, &relation.field_many, &relation.collection_one)?;
    }

    info!(files = content.files.len(), "[DIRECTUS] 6. Adding nodes");
    for file in &content.files {
        builder.node(&files, file.clone())?;
    }

    for collection in &content.collections {
        if skipped.contains(collection.name.as_str()) {
            continue;
        }
        let Some(handle) = builder.handles.get(&collection.type_name).cloned() else {
            continue;
        };
        for item in &collection.items {
            builder.node(&handle, item.clone())?;
        }
    }

    info!(
        content_types = builder.summary.content_types,
        references = builder.summary.references,
        nodes = builder.summary.nodes,
        "[DIRECTUS] Content graph built"
    );
    Ok(builder.summary)
}
