//! Local configuration for dockerdeploy
//!
//! The CLI keeps a small JSON record between invocations: the image name
//! chosen on the first publish, the base tag of the last published image and
//! the API token. See [`ConfigStore`] for how it is read and merged.

pub mod error;
pub mod store;

pub use error::*;
pub use store::{ConfigStore, DeploymentConfig, DeploymentConfigUpdate};

use std::path::PathBuf;

/// Environment variable that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "DOCKERDEPLOY_CONFIG_PATH";

const CONFIG_DIR_NAME: &str = "dockerdeploy";
const CONFIG_FILE_NAME: &str = "config.json";

/// Get the dockerdeploy config directory, creating it when missing.
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Resolve the config file location.
///
/// 1. `DOCKERDEPLOY_CONFIG_PATH` (used as-is, the file need not exist yet)
/// 2. `<config dir>/dockerdeploy/config.json`
pub fn config_file_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_file_path_env_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let custom = temp_dir.path().join("custom.json");

        temp_env::with_var(CONFIG_PATH_ENV, Some(custom.as_os_str()), || {
            assert_eq!(config_file_path().unwrap(), custom);
        });
    }

    #[test]
    #[serial]
    fn test_config_file_path_default_location() {
        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let path = config_file_path().unwrap();
            assert!(path.ends_with("dockerdeploy/config.json"));
        });
    }

    #[test]
    #[serial]
    fn test_empty_env_override_is_ignored() {
        temp_env::with_var(CONFIG_PATH_ENV, Some(""), || {
            let path = config_file_path().unwrap();
            assert!(path.ends_with("config.json"));
        });
    }
}
