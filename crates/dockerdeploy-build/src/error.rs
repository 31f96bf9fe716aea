use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Container engine must be running: {0}")]
    EngineUnavailable(String),

    #[error(
        "No image versions given (the version defaults to \"latest\" only when the version flag is omitted)"
    )]
    NoVersions,

    #[error("Invalid tag: {tag}")]
    InvalidTag { tag: String },

    #[error("Image build failed: {0}")]
    BuildFailed(String),

    #[error("Push failed for {tag}: {message}")]
    PushFailed { tag: String, message: String },

    #[error("Login to {registry} failed: {message}")]
    LoginFailed { registry: String, message: String },

    #[error("Emulator installation failed: {0}")]
    EmulatorInstallFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Message with a hint on how to fix the problem
    pub fn user_message(&self) -> String {
        match self {
            BuildError::EngineUnavailable(reason) => {
                format!(
                    "Docker must be running: {}\n\
                     \n\
                     How to fix:\n\
                     1. Start Docker Desktop (or OrbStack / the docker daemon)\n\
                     2. Check that `docker version` succeeds in this shell",
                    reason
                )
            }
            BuildError::NoVersions => {
                "No image versions given.\n\
                 \n\
                 Pass at least one --version, or omit the flag to publish \"latest\"."
                    .to_string()
            }
            BuildError::BuildFailed(msg) => {
                format!(
                    "Image build failed: {}\n\
                     \n\
                     Check the Dockerfile and the build output above.",
                    msg
                )
            }
            BuildError::LoginFailed { registry, message } => {
                format!(
                    "Login to {} failed: {}\n\
                     \n\
                     Check your API token with `dockerdeploy config show`.",
                    registry, message
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
pub type Result<T> = BuildResult<T>;
