use tracing::{error, info};

use crate::client::DirectusClient;
use crate::config::DirectusOptions;
use crate::error::SourceError;

/// Turn the configured credentials into an authenticated client.
///
/// Fails with [`SourceError::Credential`] before touching the network when the
/// url is empty or neither a token nor an email and password are set. With an
/// email and password the client logs in; the token alone is used otherwise.
pub async fn authenticate(options: &DirectusOptions) -> Result<DirectusClient, SourceError> {
    info!(url = %options.url, project = %options.project, "[DIRECTUS] 1. Logging in");

    if !options.has_credentials() {
        error!("[DIRECTUS][ERROR] Could not log in, please provide credentials");
        return Err(SourceError::Credential);
    }

    let token = Some(options.token.clone());
    let mut client = DirectusClient::new(&options.url, &options.project, token).map_err(|e| {
        error!(error = %e, "[DIRECTUS][ERROR] Could not set up client");
        SourceError::Client(e)
    })?;

    if options.has_login() {
        if let Err(e) = client.login(&options.email, &options.password).await {
            error!(error = %e, email = %options.email, "[DIRECTUS][ERROR] Could not log in");
            return Err(SourceError::Authentication(e));
        }
        info!(email = %options.email, "[DIRECTUS] Logged in");
    } else {
        info!("[DIRECTUS] Using static access token");
    }

    Ok(client)
}
