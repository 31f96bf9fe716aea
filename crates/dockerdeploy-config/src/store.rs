//! Persisted deployment configuration
//!
//! The store is loaded once per invocation and handed to the workflows by
//! `&mut`. Every [`ConfigStore::update`] merges the partial update into the
//! in-memory record and writes the whole record back to disk.

use crate::error::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Values persisted between invocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Image (application) name chosen by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Tag of the last published image, without the version suffix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_base: Option<String>,

    /// Token for the deployment API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Keys written by other tools or newer versions; kept as-is on write
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Partial update merged by [`ConfigStore::update`]
///
/// `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct DeploymentConfigUpdate {
    pub image_name: Option<Option<String>>,
    pub tag_base: Option<Option<String>>,
    pub api_token: Option<Option<String>>,
}

impl DeploymentConfigUpdate {
    pub fn image_name(name: impl Into<String>) -> Self {
        Self {
            image_name: Some(Some(name.into())),
            ..Default::default()
        }
    }

    pub fn tag_base(tag_base: impl Into<String>) -> Self {
        Self {
            tag_base: Some(Some(tag_base.into())),
            ..Default::default()
        }
    }

    pub fn api_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(Some(token.into())),
            ..Default::default()
        }
    }

    /// Forget the image name and the published tag
    pub fn reset_publish_state() -> Self {
        Self {
            image_name: Some(None),
            tag_base: Some(None),
            ..Default::default()
        }
    }

    fn apply(self, config: &mut DeploymentConfig) {
        if let Some(image_name) = self.image_name {
            config.image_name = image_name;
        }
        if let Some(tag_base) = self.tag_base {
            config.tag_base = tag_base;
        }
        if let Some(api_token) = self.api_token {
            config.api_token = api_token;
        }
    }
}

/// File-backed [`DeploymentConfig`]
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: DeploymentConfig,
}

impl ConfigStore {
    /// Load the store from the default location (see [`crate::config_file_path`])
    pub fn open() -> Result<Self> {
        Self::load(crate::config_file_path()?)
    }

    /// Load the store from `path`; a missing file yields the defaults
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;

            if content.trim().is_empty() {
                DeploymentConfig::default()
            } else {
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            DeploymentConfig::default()
        };

        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Merge `update` into the current values and persist the result
    pub fn update(&mut self, update: DeploymentConfigUpdate) -> Result<()> {
        let mut next = self.config.clone();
        update.apply(&mut next);
        next.updated_at = Some(Utc::now());

        self.write(&next)?;
        self.config = next;
        Ok(())
    }

    fn write(&self, config: &DeploymentConfig) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Config written to {:?}", self.path);
        Ok(())
    }
}
