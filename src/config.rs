use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::naming::pascal_case;
use crate::transform::{ItemShape, ItemTransform, KeyCase};

/// What to do when fetching one collection's items fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Record the failure and keep fetching the remaining collections.
    #[default]
    Continue,
    /// Stop at the first failure and load no collections at all.
    AbortRemaining,
}

/// Plugin options as handed over by the host, keys in camelCase.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectusOptions {
    pub url: String,
    pub project: String,
    pub email: String,
    pub password: String,
    pub token: String,
    pub camel_case: bool,
    pub shallow_camel_case: bool,
    pub pascal_types: bool,
    pub legacy_fields: bool,
    pub failure_policy: FailurePolicy,
    /// Canonical collection name -> route template.
    pub routes: HashMap<String, String>,
    pub debug: bool,
}

impl Default for DirectusOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            project: "_".to_string(),
            email: String::new(),
            password: String::new(),
            token: String::new(),
            camel_case: true,
            shallow_camel_case: false,
            pascal_types: true,
            legacy_fields: false,
            failure_policy: FailurePolicy::default(),
            routes: HashMap::new(),
            debug: false,
        }
    }
}

impl fmt::Debug for DirectusOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectusOptions")
            .field("url", &self.url)
            .field("project", &self.project)
            .field("email", &self.email)
            .field("password_set", &!self.password.is_empty())
            .field("token_set", &!self.token.is_empty())
            .field("camel_case", &self.camel_case)
            .field("shallow_camel_case", &self.shallow_camel_case)
            .field("pascal_types", &self.pascal_types)
            .field("legacy_fields", &self.legacy_fields)
            .field("failure_policy", &self.failure_policy)
            .field("routes", &self.routes)
            .field("debug", &self.debug)
            .finish()
    }
}

impl DirectusOptions {
    pub fn from_value(value: serde_json::Value) -> Result<Self, SourceError> {
        serde_json::from_value(value).map_err(|e| SourceError::Config(e.to_string()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SourceError> {
        serde_json::from_str(raw).map_err(|e| SourceError::Config(e.to_string()))
    }

    /// Reads connection settings from the environment, loading `.env` first if
    /// one exists. Everything else keeps its default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        let defaults = Self::default();
        let project = std::env::var("DIRECTUS_PROJECT")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.project.clone());
        Self {
            url: var("DIRECTUS_URL"),
            project,
            email: var("DIRECTUS_EMAIL"),
            password: var("DIRECTUS_PASSWORD"),
            token: var("DIRECTUS_TOKEN"),
            ..defaults
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.url.is_empty() && (!self.token.is_empty() || self.has_login())
    }

    /// Whether an email and password pair is configured.
    pub fn has_login(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn key_case(&self) -> KeyCase {
        match (self.camel_case, self.shallow_camel_case) {
            (false, _) => KeyCase::Preserve,
            (true, true) => KeyCase::Shallow,
            (true, false) => KeyCase::Deep,
        }
    }

    pub fn item_shape(&self) -> ItemShape {
        if self.legacy_fields {
            ItemShape::Legacy
        } else {
            ItemShape::Flat
        }
    }

    pub fn item_transform(&self) -> ItemTransform {
        ItemTransform {
            key_case: self.key_case(),
            shape: self.item_shape(),
        }
    }

    /// Content type name for a canonical collection name.
    pub fn type_name(&self, collection: &str) -> String {
        if self.pascal_types {
            pascal_case(collection)
        } else {
            collection.to_string()
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            url = %self.url,
            project = %self.project,
            token_set = !self.token.is_empty(),
            login_set = self.has_login(),
            routes = self.routes.len(),
            "Loaded Directus options"
        );
        debug!(?self, "Directus options loaded (full debug)");
    }
}
