//! Error types for fetching and loading Directus content.

use thiserror::Error;

/// Error type host stores return from [`crate::contract::ContentStore`] calls.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// One failed request against the Directus API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid Directus url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors surfaced to the host by a source load.
///
/// Item, relation and file fetch failures are not in here: they are logged and
/// collected into the load report instead.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Neither a token nor an email and password were given alongside a url.
    #[error("no credentials found: provide a url and either a token or an email and password")]
    Credential,

    /// The HTTP client could not be set up from the configured url.
    #[error("could not set up Directus client: {0}")]
    Client(#[source] FetchError),

    #[error("could not log in: {0}")]
    Authentication(#[source] FetchError),

    #[error("could not fetch {resource}: {source}")]
    Fetch {
        resource: String,
        #[source]
        source: FetchError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("content store rejected {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}
