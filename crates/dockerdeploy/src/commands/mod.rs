pub mod config;
pub mod deploy;
pub mod publish;

use dockerdeploy_cloud::{ApiClient, ApiConfig};
use dockerdeploy_config::ConfigStore;

/// API client using the env token, or the stored one
pub(crate) fn api_client(store: &ConfigStore) -> ApiClient {
    ApiClient::new(ApiConfig::from_env(store.config().api_token.as_deref()))
}
