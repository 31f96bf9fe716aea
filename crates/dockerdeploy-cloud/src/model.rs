//! Records exchanged with the deployment API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Registry login issued by the API for the current account
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resource tier of a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentSize {
    #[default]
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
}

/// Body of `POST /deployments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDeploymentModel {
    pub name: String,
    /// Empty lets the platform assign a domain
    pub domain: String,
    pub size: DeploymentSize,
    /// Compose descriptor of the service(s) to run
    #[serde(rename = "dockerfile")]
    pub descriptor: String,
}

/// Deployment as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ids are numeric on some API versions
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model_wire_format() {
        let model = CreateDeploymentModel {
            name: "dockerdeploy-app".to_string(),
            domain: String::new(),
            size: DeploymentSize::Xs,
            descriptor: "services: {}".to_string(),
        };

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "dockerdeploy-app",
                "domain": "",
                "size": "XS",
                "dockerfile": "services: {}"
            })
        );
    }

    #[test]
    fn test_deployment_accepts_extra_fields() {
        let deployment: Deployment = serde_json::from_str(
            r#"{"id":"dep_123","domain":"myapp.dockerdeploy.app","createdAt":"2024-01-01","status":"pending"}"#,
        )
        .unwrap();

        assert_eq!(deployment.id, "dep_123");
        assert_eq!(deployment.domain, "myapp.dockerdeploy.app");
        assert_eq!(deployment.status.as_deref(), Some("pending"));
        assert_eq!(deployment.name, None);
    }

    #[test]
    fn test_deployment_numeric_id() {
        let deployment: Deployment =
            serde_json::from_str(r#"{"id":42,"domain":"x.example"}"#).unwrap();
        assert_eq!(deployment.id, "42");
    }

    #[test]
    fn test_size_names() {
        assert_eq!(serde_json::to_string(&DeploymentSize::Xl).unwrap(), "\"XL\"");
        let size: DeploymentSize = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(size, DeploymentSize::M);
        assert_eq!(DeploymentSize::default(), DeploymentSize::Xs);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds: RegistryCredentials =
            serde_json::from_str(r#"{"username":"alice","password":"pw-123"}"#).unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("pw-123"));
    }
}
