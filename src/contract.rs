//! # contract: the two collaborators of a source load
//!
//! This module defines the traits the pipeline talks to, so it can run against
//! real services or mocks:
//!
//! - [`DirectusApi`]: the remote CMS (collections, items, relations, files).
//!   Implemented by [`crate::client::DirectusClient`].
//! - [`ContentStore`]: the host's content store, a three-method capability
//!   (`add_content_type`, `add_reference`, `add_node`). Implemented by the host,
//!   and by [`crate::memory_store::MemoryStore`].
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; the mocks are exported under the
//!   default `test-export-mocks` feature so downstream tests can use them.
//!
//! ## Errors
//! - API calls return [`FetchError`]; store calls return the boxed [`StoreError`]
//!   so hosts can surface whatever error type they use.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::{FetchError, StoreError};
use crate::model::{CollectionInfo, Item, RawRelation};

/// Read access to a Directus project.
///
/// Implementations hold whatever authentication state they need; callers pass
/// the authenticated value explicitly to each pipeline stage.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DirectusApi: Send + Sync {
    /// List every collection, system collections included.
    async fn collections(&self) -> Result<Vec<CollectionInfo>, FetchError>;

    /// Fetch all items of one collection.
    async fn items(&self, collection: &str) -> Result<Vec<Item>, FetchError>;

    /// Fetch the relations whose many side is not a system collection.
    async fn relations(&self) -> Result<Vec<RawRelation>, FetchError>;

    /// Fetch the whole file library.
    async fn files(&self) -> Result<Vec<Item>, FetchError>;
}

/// Parameters for declaring a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeSpec {
    pub type_name: String,
    pub route: Option<String>,
}

impl ContentTypeSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            route: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }
}

/// Handle to a declared node type, returned by [`ContentStore::add_content_type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentTypeHandle {
    type_name: String,
}

impl ContentTypeHandle {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// The host's content store.
///
/// A reference names its target by type name; the target must already be
/// declared when the reference is added.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ContentStore {
    fn add_content_type(&mut self, spec: ContentTypeSpec) -> Result<ContentTypeHandle, StoreError>;

    /// Declare that `field` on nodes of `content_type` points at a node of `target_type`.
    fn add_reference(
        &mut self,
        content_type: &ContentTypeHandle,
        field: &str,
        target_type: &str,
    ) -> Result<(), StoreError>;

    fn add_node(&mut self, content_type: &ContentTypeHandle, node: Item) -> Result<(), StoreError>;
}
