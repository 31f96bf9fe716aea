//! Registry login
//!
//! The password is handed to the engine on standard input
//! (`--password-stdin`), never as an argument, so it stays out of the
//! process list and shell history.

use crate::tag::registry_namespace;
use std::fmt;

/// Credentials for `login` against the managed registry
#[derive(Clone)]
pub struct RegistryLogin {
    registry: String,
    username: String,
    password: String,
}

impl RegistryLogin {
    /// Login for `registry.dockerdeploy.cloud/{username}`
    pub fn for_user(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            registry: registry_namespace(&username),
            username,
            password: password.into(),
        }
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Arguments for the engine, without the secret
    pub fn args(&self) -> Vec<String> {
        vec![
            "login".to_string(),
            self.registry.clone(),
            "-u".to_string(),
            self.username.clone(),
            "--password-stdin".to_string(),
        ]
    }
}

impl fmt::Debug for RegistryLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLogin")
            .field("registry", &self.registry)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
