//! Admin API client.

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};

use crate::config::SetupConfig;
use crate::error::{SetupError, SetupResult};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticated client for the server's admin REST API.
#[derive(Debug)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    /// Creates a client and logs the admin user in with a password grant.
    pub async fn connect(config: &SetupConfig) -> SetupResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        let base_url = config.base_url().to_string();
        let token = fetch_token(&client, &base_url, config).await?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Makes an admin POST that creates a resource.
    ///
    /// Returns the new resource's ID taken from the `Location` header, if
    /// the server sent one.
    pub async fn create<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource_type: &str,
        id: &str,
    ) -> SetupResult<Option<String>> {
        let url = format!("{}/admin/realms{}", self.base_url, path);
        tracing::debug!(%url, resource_type, id, "creating resource");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(location_id(&response));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if status == StatusCode::CONFLICT {
            return Err(SetupError::AlreadyExists {
                resource_type: resource_type.to_string(),
                id: id.to_string(),
            });
        }
        Err(SetupError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn fetch_token(
    client: &reqwest::Client,
    base_url: &str,
    config: &SetupConfig,
) -> SetupResult<String> {
    let url = format!(
        "{}/realms/{}/protocol/openid-connect/token",
        base_url, config.admin_realm
    );
    let response = client
        .post(&url)
        .form(&[
            ("grant_type", "password"),
            ("client_id", config.admin_client_id.as_str()),
            ("username", config.admin_username.as_str()),
            ("password", config.admin_password.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SetupError::Auth(format!(
            "token request as {} failed with {status}: {message}",
            config.admin_username
        )));
    }

    let token: TokenResponse = response.json().await?;
    tracing::info!(
        realm = %config.admin_realm,
        username = %config.admin_username,
        "obtained admin token"
    );
    Ok(token.access_token)
}

/// Last path segment of the `Location` header.
fn location_id(response: &reqwest::Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
