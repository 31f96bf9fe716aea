//! dockerdeploy.cloud API client
//!
//! Plain request/response calls with bearer token authentication. Every
//! call is attempted once; failures are returned to the caller unchanged.

use crate::error::{CloudError, Result};
use crate::model::{CreateDeploymentModel, Deployment, RegistryCredentials};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.dockerdeploy.cloud";
pub const API_URL_ENV: &str = "DOCKERDEPLOY_API_URL";
pub const API_TOKEN_ENV: &str = "DOCKERDEPLOY_API_TOKEN";

const DASHBOARD_BASE: &str = "https://dockerdeploy.cloud/dashboard/deployments";

/// Dashboard page where a deployment can be edited
pub fn dashboard_url(deployment_id: &str) -> String {
    format!("{}/{}", DASHBOARD_BASE, deployment_id)
}

/// Operations the CLI needs from the deployment platform
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Registry login for the authenticated account
    async fn get_registry_credentials(&self) -> Result<RegistryCredentials>;

    /// Register a new deployment
    async fn create_deployment(&self, model: &CreateDeploymentModel) -> Result<Deployment>;

    /// Start a previously created deployment
    async fn deploy_deployment(&self, deployment_id: &str) -> Result<()>;
}

/// Connection settings for [`ApiClient`]
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Settings from the environment
    ///
    /// `DOCKERDEPLOY_API_TOKEN` wins over `stored_token` (the token saved in
    /// the local config).
    pub fn from_env(stored_token: Option<&str>) -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| stored_token.map(str::to_string));

        Self::new(base_url, token)
    }
}

/// reqwest based [`DeploymentApi`]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // missing token is only an error once a call is actually made
    fn token(&self) -> Result<&str> {
        self.config.token.as_deref().ok_or(CloudError::MissingToken)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(CloudError::ApiError {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

#[async_trait]
impl DeploymentApi for ApiClient {
    async fn get_registry_credentials(&self) -> Result<RegistryCredentials> {
        let url = self.url("/registry/credentials");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token()?)
            .send()
            .await?;

        let credentials: RegistryCredentials = Self::check(response).await?.json().await?;
        tracing::debug!("Received registry credentials for {}", credentials.username);
        Ok(credentials)
    }

    async fn create_deployment(&self, model: &CreateDeploymentModel) -> Result<Deployment> {
        let url = self.url("/deployments");
        tracing::debug!("POST {} ({})", url, model.name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(model)
            .send()
            .await?;

        let deployment: Deployment = Self::check(response).await?.json().await?;
        tracing::info!("Created deployment {}", deployment.id);
        Ok(deployment)
    }

    async fn deploy_deployment(&self, deployment_id: &str) -> Result<()> {
        let url = self.url(&format!("/deployments/{}/deploy", deployment_id));
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!("Triggered deployment {}", deployment_id);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Human readable message from an error response body
fn api_error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "(empty response)".to_string();
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.to_string(),
    }
}
