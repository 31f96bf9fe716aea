//! dockerdeploy container engine integration
//!
//! This crate drives the container engine CLI for dockerdeploy: checking
//! that the engine is reachable, installing the cross-architecture emulator,
//! logging into the managed registry, building images and pushing them.

pub mod auth;
pub mod engine;
pub mod error;
pub mod platform;
pub mod progress;
pub mod runner;
pub mod tag;

pub use auth::RegistryLogin;
pub use engine::{BuildRequest, ContainerEngine};
pub use error::{BuildError, BuildResult};
pub use platform::{HostArch, TARGET_PLATFORM};
pub use progress::StepProgress;
pub use runner::{CommandSpec, ProcessOutput, ProcessRunner, SystemRunner};
pub use tag::{
    DEFAULT_APP_NAME, ImageTags, REGISTRY_HOST, image_tag_base, registry_namespace,
    validate_image_name,
};
