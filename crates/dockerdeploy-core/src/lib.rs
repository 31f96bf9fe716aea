//! dockerdeploy workflows
//!
//! The two user-facing workflows, `publish` and `deploy`, written against
//! injected collaborators:
//!
//! ```text
//!             ┌──────────── dockerdeploy (CLI) ────────────┐
//!             │  publish                         deploy    │
//!             └──────┬──────────────────────────────┬──────┘
//!                    │                              │
//!  ┌─────────────────▼─────────────────┐   ┌────────▼────────┐
//!  │ Publisher                         │   │ Deployer        │
//!  │  preflight → name → creds → login │   │  tagBase →      │
//!  │  → build → push → save tagBase    │   │  create → start │
//!  └──┬──────────┬──────────┬──────────┘   └───┬─────────┬───┘
//!     │          │          │                  │         │
//!  Prompter  ContainerEngine  DeploymentApi ◄──┘    ConfigStore
//! ```

pub mod deploy;
pub mod error;
pub mod preflight;
pub mod prompt;
pub mod publish;

pub use deploy::{DEPLOYMENT_NAME, DeployOutcome, Deployer, deployment_descriptor};
pub use error::{Result, WorkflowError};
pub use preflight::EmulatorStatus;
pub use prompt::{Prompter, Validator};
pub use publish::{PublishOptions, PublishOutcome, Publisher};
