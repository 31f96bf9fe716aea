//! dockerdeploy.cloud API
//!
//! Client for the hosted deployment platform: registry credentials,
//! deployment creation and deployment start. The workflows depend on the
//! [`DeploymentApi`] trait so they can run against a fake in tests.

pub mod client;
pub mod error;
pub mod model;

pub use client::{
    API_TOKEN_ENV, API_URL_ENV, ApiClient, ApiConfig, DEFAULT_API_URL, DeploymentApi,
    dashboard_url,
};
pub use error::{CloudError, Result};
pub use model::{CreateDeploymentModel, Deployment, DeploymentSize, RegistryCredentials};
