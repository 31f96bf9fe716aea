//! Image naming and tag construction
//!
//! Tags published by dockerdeploy always look like
//! `registry.dockerdeploy.cloud/{username}/{app}:{version}`.

use crate::error::{BuildError, BuildResult};
use regex::Regex;
use std::sync::LazyLock;

/// Managed registry host
pub const REGISTRY_HOST: &str = "registry.dockerdeploy.cloud";

/// App name used when no image name has been configured
pub const DEFAULT_APP_NAME: &str = "app";

static IMAGE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+([._-]{1,2}[a-z0-9]+)*$").expect("image name pattern is valid")
});

/// `registry.dockerdeploy.cloud/{username}`
pub fn registry_namespace(username: &str) -> String {
    format!("{}/{}", REGISTRY_HOST, username)
}

/// `registry.dockerdeploy.cloud/{username}/{app_name}`
pub fn image_tag_base(username: &str, app_name: &str) -> String {
    format!("{}/{}", registry_namespace(username), app_name)
}

/// Check a user supplied image name
///
/// Returns a message suitable for showing next to the prompt on rejection.
pub fn validate_image_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Image name must not be empty".to_string());
    }

    if !IMAGE_NAME_PATTERN.is_match(name) {
        return Err(format!(
            "Invalid image name '{}': use lowercase letters and digits, separated by '.', '_' or '-' (at most two in a row)",
            name
        ));
    }

    Ok(())
}

/// Check a version suffix against the engine's tag rules
fn validate_version(tag: &str) -> BuildResult<()> {
    // - at most 128 characters
    // - ASCII alphanumerics, '.', '-', '_'
    // - must not start with '.' or '-'

    if tag.is_empty() {
        return Err(BuildError::InvalidTag {
            tag: "(empty)".to_string(),
        });
    }

    if tag.len() > 128 {
        return Err(BuildError::InvalidTag {
            tag: format!("Tag too long ({} characters, max 128)", tag.len()),
        });
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Err(BuildError::InvalidTag {
            tag: tag.to_string(),
        });
    }

    for c in tag.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Err(BuildError::InvalidTag {
                tag: format!("Invalid character '{}' in tag: {}", c, tag),
            });
        }
    }

    Ok(())
}

/// Fully qualified tags for one build, in the order the versions were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTags {
    base: String,
    tags: Vec<String>,
}

impl ImageTags {
    /// Map every version to `{base}:{version}`
    ///
    /// An empty `versions` list is an error: the caller is expected to have
    /// applied the `latest` default already.
    pub fn new(username: &str, app_name: &str, versions: &[String]) -> BuildResult<Self> {
        if versions.is_empty() {
            return Err(BuildError::NoVersions);
        }

        for version in versions {
            validate_version(version)?;
        }

        let base = image_tag_base(username, app_name);
        let tags = versions
            .iter()
            .map(|version| format!("{}:{}", base, version))
            .collect();

        Ok(Self { base, tags })
    }

    /// Tag without the version suffix
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Tag of the first version; the only one that gets pushed
    pub fn primary(&self) -> &str {
        &self.tags[0]
    }

    pub fn all(&self) -> &[String] {
        &self.tags
    }
}
