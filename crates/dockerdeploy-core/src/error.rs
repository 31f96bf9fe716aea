use dockerdeploy_build::BuildError;
use dockerdeploy_cloud::CloudError;
use dockerdeploy_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("Failed to render deployment descriptor: {0}")]
    Descriptor(#[from] serde_yaml::Error),
}

impl WorkflowError {
    /// Message with a hint on how to fix the problem
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Build(e) => e.user_message(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
