use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A record as returned by Directus, or after normalization.
pub type Item = serde_json::Map<String, serde_json::Value>;

/// Prefix Directus reserves for its own system collections.
pub const SYSTEM_PREFIX: &str = "directus_";

/// Collection holding the global file library.
pub const DIRECTUS_FILES: &str = "directus_files";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl FieldDescriptor {
    /// A file field references an entry of the file library.
    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }
}

/// One entry of the collections listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub collection: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,
}

impl CollectionInfo {
    pub fn is_system(&self) -> bool {
        self.collection.starts_with(SYSTEM_PREFIX)
    }
}

/// An enumerated collection and, once fetched, its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    /// Canonical name, used for API calls and route lookup.
    pub name: String,
    /// Name the collection is declared under in the content store.
    pub type_name: String,
    pub fields: BTreeMap<String, FieldDescriptor>,
    pub items: Vec<Item>,
    /// Node keys of the fields holding a file reference.
    pub file_fields: Vec<String>,
}

/// A many-to-one relation as declared in Directus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRelation {
    pub collection_many: String,
    #[serde(default)]
    pub field_many: Option<String>,
    #[serde(default)]
    pub collection_one: Option<String>,
}

/// A relation with field and collection names matching declared types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub collection_many: String,
    pub field_many: String,
    pub collection_one: String,
}

/// A fetch that failed and was replaced with an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub resource: String,
    pub message: String,
}

/// Everything fetched for one build, ready for the graph builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchedContent {
    pub collections: Vec<Collection>,
    pub relations: Vec<Relation>,
    pub files: Vec<Item>,
    pub failures: Vec<FetchFailure>,
}
