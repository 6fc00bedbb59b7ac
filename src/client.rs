//! REST client for the Directus API.
//!
//! Every endpoint lives under `{url}/{project}/` and wraps its payload in a
//! `{ "data": ... }` envelope. A limit of `-1` asks Directus for all rows.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::contract::DirectusApi;
use crate::error::FetchError;
use crate::model::{CollectionInfo, Item, RawRelation, SYSTEM_PREFIX};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_ALL: &str = "-1";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Clone)]
pub struct DirectusClient {
    http: Client,
    base_url: String,
    project: String,
    token: Option<String>,
}

impl DirectusClient {
    pub fn new(
        url: &str,
        project: &str,
        token: Option<String>,
    ) -> Result<Self, FetchError> {
        let base_url = url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            project: project.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.project, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Exchange email and password for an access token, kept in memory only.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), FetchError> {
        let url = self.endpoint("auth/authenticate");
        info!(url = %url, email = %email, "Authenticating against Directus");
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "mode": "jwt",
        });
        let response = self.http.post(&url).json(&body).send().await?;
        let login: LoginData = read_envelope(url, response).await?;
        self.token = Some(login.token);
        Ok(())
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!(url = %url, ?query, "GET Directus endpoint");
        let request = self.authorize(self.http.get(&url).query(query));
        let response = request.send().await?;
        read_envelope(url, response).await
    }
}

async fn read_envelope<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
            body: text,
        });
    }
    let envelope: Envelope<T> = serde_json::from_str(&text)?;
    Ok(envelope.data)
}

#[async_trait]
impl DirectusApi for DirectusClient {
    async fn collections(&self) -> Result<Vec<CollectionInfo>, FetchError> {
        self.get_data("collections", &[]).await
    }

    async fn items(&self, collection: &str) -> Result<Vec<Item>, FetchError> {
        self.get_data(&format!("items/{collection}"), &[("limit", FETCH_ALL)])
            .await
    }

    async fn relations(&self) -> Result<Vec<RawRelation>, FetchError> {
        self.get_data(
            "relations",
            &[("filter[collection_many][nlike]", SYSTEM_PREFIX)],
        )
        .await
    }

    async fn files(&self) -> Result<Vec<Item>, FetchError> {
        self.get_data("files", &[("limit", FETCH_ALL)]).await
    }
}
