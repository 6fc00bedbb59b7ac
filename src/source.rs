//! Entry point: one call per build loads Directus content into a host store.
//!
//! The pipeline runs strictly in sequence:
//!   1. authenticate (fatal on missing or rejected credentials)
//!   2. enumerate collections (fatal on failure)
//!   3. fetch items per collection (failures recorded, see [`FailurePolicy`])
//!   4. fetch relations and files (failures recorded, empty fallback)
//!   5. declare types and references, insert nodes (store errors propagate)
//!
//! The authenticated client is handed to each stage; nothing is kept between
//! calls.
//!
//! [`FailurePolicy`]: crate::config::FailurePolicy

use serde::Serialize;
use tracing::{info, warn};

use crate::auth::authenticate;
use crate::config::DirectusOptions;
use crate::contract::{ContentStore, DirectusApi};
use crate::error::SourceError;
use crate::fetch::fetch_content;
use crate::graph::{build_graph, GraphSummary};
use crate::model::FetchFailure;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub name: String,
    pub type_name: String,
    pub items: usize,
}

/// What a load put into the store, and what it had to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub collections: Vec<CollectionReport>,
    pub relations: usize,
    pub files: usize,
    pub graph: GraphSummary,
    pub failures: Vec<FetchFailure>,
}

impl SourceReport {
    /// Whether any fetch failed and was replaced with an empty result.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct DirectusSource {
    options: DirectusOptions,
}

impl DirectusSource {
    pub fn new(options: DirectusOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DirectusOptions {
        &self.options
    }

    /// Authenticate with the configured credentials, then load everything.
    pub async fn load<S>(&self, store: &mut S) -> Result<SourceReport, SourceError>
    where
        S: ContentStore + ?Sized,
    {
        self.options.trace_loaded();
        let client = authenticate(&self.options).await?;
        self.load_with(&client, store).await
    }

    /// Load through an already authenticated API.
    pub async fn load_with<A, S>(&self, api: &A, store: &mut S) -> Result<SourceReport, SourceError>
    where
        A: DirectusApi + ?Sized,
        S: ContentStore + ?Sized,
    {
        let content = fetch_content(api, &self.options).await?;
        let graph = build_graph(&content, &self.options.routes, store)?;

        let report = SourceReport {
            collections: content
                .collections
                .iter()
                .map(|c| CollectionReport {
                    name: c.name.clone(),
                    type_name: c.type_name.clone(),
                    items: c.items.len(),
                })
                .collect(),
            relations: content.relations.len(),
            files: content.files.len(),
            graph,
            failures: content.failures,
        };

        if report.is_partial() {
            warn!(
                failures = report.failures.len(),
                failed = ?report.failures.iter().map(|f| f.resource.as_str()).collect::<Vec<_>>(),
                "[DIRECTUS] Load finished with partial content"
            );
        } else {
            info!(
                collections = report.collections.len(),
                nodes = report.graph.nodes,
                "[DIRECTUS] Load complete"
            );
        }
        Ok(report)
    }
}
