//! Fetch stages: enumerate collections, then items, relations and files.
//!
//! Every stage takes the authenticated API explicitly and runs strictly after
//! the previous one. Only the collections listing is fatal; the other stages
//! log a failure, record it and fall back to an empty result.

use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};

use crate::config::{DirectusOptions, FailurePolicy};
use crate::contract::DirectusApi;
use crate::error::{FetchError, SourceError};
use crate::graph::FILES_TYPE;
use crate::model::{
    Collection, FetchFailure, FetchedContent, Item, RawRelation, Relation, DIRECTUS_FILES,
    SYSTEM_PREFIX,
};
use crate::transform::{file_fields, IdMode};

fn record_failure(failures: &mut Vec<FetchFailure>, resource: &str, e: &FetchError) {
    failures.push(FetchFailure {
        resource: resource.to_string(),
        message: e.to_string(),
    });
}

fn log_records(options: &DirectusOptions, resource: &str, records: &[Item]) {
    if !options.debug {
        return;
    }
    for record in records {
        match serde_json::to_string(record) {
            Ok(json) => info!(resource = %resource, json = %json, "[DIRECTUS][DEBUG] Transformed record"),
            Err(e) => warn!(resource = %resource, error = ?e, "[DIRECTUS][DEBUG] Failed to serialize record"),
        }
    }
}

/// Give every collection a type name no other type uses.
///
/// A name taken by `Files` or by an earlier collection falls back to the
/// collection name. A collection that still collides is dropped and recorded.
fn assign_type_names(
    collections: Vec<Collection>,
    failures: &mut Vec<FetchFailure>,
) -> Vec<Collection> {
    let mut taken = HashSet::from([FILES_TYPE.to_string()]);
    let mut assigned = Vec::with_capacity(collections.len());
    for mut collection in collections {
        if taken.contains(&collection.type_name) {
            if taken.contains(&collection.name) {
                error!(collection = %collection.name, type_name = %collection.type_name, "[DIRECTUS][ERROR] Type name already in use, skipping collection");
                failures.push(FetchFailure {
                    resource: format!("collections/{}", collection.name),
                    message: format!("type name {} is already in use", collection.type_name),
                });
                continue;
            }
            warn!(collection = %collection.name, type_name = %collection.type_name, "[DIRECTUS] Type name already in use, using the collection name");
            collection.type_name = collection.name.clone();
        }
        taken.insert(collection.type_name.clone());
        assigned.push(collection);
    }
    assigned
}

/// List the project's content collections, system collections excluded.
pub async fn enumerate_collections<A>(
    api: &A,
    options: &DirectusOptions,
    failures: &mut Vec<FetchFailure>,
) -> Result<Vec<Collection>, SourceError>
where
    A: DirectusApi + ?Sized,
{
    info!("[DIRECTUS] 2. Getting collections");
    let listed = api.collections().await.map_err(|e| {
        error!(error = %e, "[DIRECTUS][ERROR] Could not get collections");
        SourceError::Fetch {
            resource: "collections".to_string(),
            source: e,
        }
    })?;

    let key_case = options.key_case();
    let collections: Vec<Collection> = listed
        .into_iter()
        .filter(|info| !info.is_system())
        .map(|info| Collection {
            type_name: options.type_name(&info.collection),
            file_fields: file_fields(&info, key_case),
            name: info.collection,
            fields: info.fields,
            items: Vec::new(),
        })
        .collect();
    let collections = assign_type_names(collections, failures);
    info!(count = collections.len(), "[DIRECTUS] Collections enumerated");
    Ok(collections)
}

/// Fetch and transform the items of every collection, in order.
///
/// Under [`FailurePolicy::AbortRemaining`] the first failure ends the loop and
/// no collection is returned at all.
pub async fn fetch_items<A>(
    api: &A,
    mut collections: Vec<Collection>,
    options: &DirectusOptions,
    failures: &mut Vec<FetchFailure>,
) -> Vec<Collection>
where
    A: DirectusApi + ?Sized,
{
    let transform = options.item_transform();
    let total = collections.len();
    for (index, collection) in collections.iter_mut().enumerate() {
        info!(index, collection = %collection.name, "[DIRECTUS] 2.{} Getting items", index);
        match api.items(&collection.name).await {
            Ok(items) => {
                collection.items = items
                    .iter()
                    .map(|item| transform.apply(item, IdMode::Stringify))
                    .collect();
                info!(collection = %collection.name, items = collection.items.len(), "[DIRECTUS] Items fetched");
                log_records(options, &collection.name, &collection.items);
            }
            Err(e) => {
                error!(collection = %collection.name, error = %e, "[DIRECTUS][ERROR] Could not get items");
                record_failure(failures, &format!("items/{}", collection.name), &e);
                if options.failure_policy == FailurePolicy::AbortRemaining {
                    warn!(
                        pending = total - index - 1,
                        "[DIRECTUS][ERROR] Aborting item fetch, no collections will be loaded"
                    );
                    return Vec::new();
                }
            }
        }
    }
    collections
}

/// Type names of the enumerated collections, keyed by collection name.
pub type TypeNames = HashMap<String, String>;

fn normalize_relation(
    raw: RawRelation,
    options: &DirectusOptions,
    type_names: &TypeNames,
) -> Option<Relation> {
    if raw.collection_many.starts_with(SYSTEM_PREFIX) {
        return None;
    }
    let collection_one = raw.collection_one.filter(|c| !c.is_empty())?;
    let Some(collection_many) = type_names.get(&raw.collection_many) else {
        warn!(collection = %raw.collection_many, "[DIRECTUS] Skipping relation from unknown collection");
        return None;
    };
    let collection_one = if collection_one == DIRECTUS_FILES {
        FILES_TYPE.to_string()
    } else if let Some(type_name) = type_names.get(&collection_one) {
        type_name.clone()
    } else {
        warn!(collection = %collection_one, "[DIRECTUS] Skipping relation to unknown collection");
        return None;
    };
    let field_many = match raw.field_many.filter(|f| !f.is_empty()) {
        Some(field) => options.item_transform().key(&field),
        None => "id".to_string(),
    };
    Some(Relation {
        collection_many: collection_many.clone(),
        field_many,
        collection_one,
    })
}

/// Fetch many-to-one relations with names matching the declared types.
pub async fn fetch_relations<A>(
    api: &A,
    options: &DirectusOptions,
    type_names: &TypeNames,
    failures: &mut Vec<FetchFailure>,
) -> Vec<Relation>
where
    A: DirectusApi + ?Sized,
{
    info!("[DIRECTUS] 3. Getting relations");
    match api.relations().await {
        Ok(raw) => {
            let relations: Vec<Relation> = raw
                .into_iter()
                .filter_map(|r| normalize_relation(r, options, type_names))
                .collect();
            info!(count = relations.len(), "[DIRECTUS] Relations fetched");
            relations
        }
        Err(e) => {
            error!(error = %e, "[DIRECTUS][ERROR] Could not get relations");
            record_failure(failures, "relations", &e);
            Vec::new()
        }
    }
}

/// Fetch the file library; file ids keep their original type.
pub async fn fetch_files<A>(
    api: &A,
    options: &DirectusOptions,
    failures: &mut Vec<FetchFailure>,
) -> Vec<Item>
where
    A: DirectusApi + ?Sized,
{
    info!("[DIRECTUS] 4. Getting files");
    match api.files().await {
        Ok(files) => {
            let transform = options.item_transform();
            let files: Vec<Item> = files
                .iter()
                .map(|file| transform.apply(file, IdMode::Preserve))
                .collect();
            info!(count = files.len(), "[DIRECTUS] Files fetched");
            log_records(options, "files", &files);
            files
        }
        Err(e) => {
            error!(error = %e, "[DIRECTUS][ERROR] Could not get files");
            record_failure(failures, "files", &e);
            Vec::new()
        }
    }
}

/// Run every fetch stage in sequence.
pub async fn fetch_content<A>(
    api: &A,
    options: &DirectusOptions,
) -> Result<FetchedContent, SourceError>
where
    A: DirectusApi + ?Sized,
{
    let mut failures = Vec::new();
    let collections = enumerate_collections(api, options, &mut failures).await?;
    let type_names: TypeNames = collections
        .iter()
        .map(|c| (c.name.clone(), c.type_name.clone()))
        .collect();
    let collections = fetch_items(api, collections, options, &mut failures).await;
    let relations = fetch_relations(api, options, &type_names, &mut failures).await;
    let files = fetch_files(api, options, &mut failures).await;
    Ok(FetchedContent {
        collections,
        relations,
        files,
        failures,
    })
}
