#![doc = "directus-source: pulls Directus content into a typed content graph."]

//! This crate fetches collections, items, relations and the file library from a
//! Directus instance and registers them with a host content store, one node type
//! per collection plus a `Files` type.
//!
//! # Usage
//! Build [`config::DirectusOptions`] from the host's plugin options, hand a
//! [`contract::ContentStore`] implementation to [`source::DirectusSource::load`],
//! and inspect the returned [`source::SourceReport`].

pub mod auth;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod memory_store;
pub mod model;
pub mod naming;
pub mod source;
pub mod transform;

pub use config::{DirectusOptions, FailurePolicy};
pub use error::{FetchError, SourceError, StoreError};
pub use source::{DirectusSource, SourceReport};
