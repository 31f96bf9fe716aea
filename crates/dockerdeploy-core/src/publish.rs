//! `publish`: build the image and push it to the managed registry
//!
//! Steps, in order, each aborting the rest on failure:
//! 1. preflight (build file, engine, emulator)
//! 2. image name (prompted once, then persisted)
//! 3. registry credentials from the API
//! 4. registry login
//! 5. build with every version tag, push the first one
//! 6. persist the base tag for `deploy`

use crate::error::Result;
use crate::preflight;
use crate::prompt::Prompter;
use colored::Colorize;
use dockerdeploy_build::{
    BuildError, BuildRequest, ContainerEngine, DEFAULT_APP_NAME, HostArch, ImageTags,
    RegistryLogin, validate_image_name,
};
use dockerdeploy_cloud::{DeploymentApi, RegistryCredentials};
use dockerdeploy_config::{ConfigStore, DeploymentConfigUpdate};
use std::path::{Path, PathBuf};

/// Inputs of a publish run
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub dockerfile: PathBuf,
    /// Non-empty; the CLI substitutes `latest` when no version is given
    pub versions: Vec<String>,
    /// Answer yes to the emulator prompt
    pub assume_yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(ImageTags),
    /// Soft failure: nothing was built and nothing persisted
    DockerfileMissing,
}

pub struct Publisher<'a> {
    engine: &'a ContainerEngine,
    api: &'a dyn DeploymentApi,
    prompter: &'a dyn Prompter,
    arch: HostArch,
}

impl<'a> Publisher<'a> {
    pub fn new(
        engine: &'a ContainerEngine,
        api: &'a dyn DeploymentApi,
        prompter: &'a dyn Prompter,
        arch: HostArch,
    ) -> Self {
        Self {
            engine,
            api,
            prompter,
            arch,
        }
    }

    /// Run the whole publish workflow
    pub async fn run(
        &self,
        store: &mut ConfigStore,
        options: &PublishOptions,
    ) -> Result<PublishOutcome> {
        if !preflight::dockerfile_exists(&options.dockerfile) {
            return Ok(PublishOutcome::DockerfileMissing);
        }

        preflight::ensure_engine_running(self.engine).await?;
        preflight::ensure_emulator(self.engine, self.prompter, self.arch, options.assume_yes)
            .await;

        self.set_app_name_if_necessary(store)?;

        println!("{}", "Fetching registry credentials...".blue());
        let credentials = self.api.get_registry_credentials().await?;

        self.login(&credentials).await?;

        let tags = self
            .build_and_publish_image(store, &options.dockerfile, &credentials, &options.versions)
            .await?;

        println!();
        println!("{}", "✓ Image published!".green().bold());
        println!("  {}", tags.primary().cyan());
        println!("  Run `dockerdeploy deploy` to start it.");

        Ok(PublishOutcome::Published(tags))
    }

    /// Make sure an image name is persisted, prompting for one if needed
    ///
    /// Returns the name in effect.
    pub fn set_app_name_if_necessary(&self, store: &mut ConfigStore) -> Result<String> {
        if let Some(name) = &store.config().image_name {
            tracing::debug!("Using configured image name {}", name);
            return Ok(name.clone());
        }

        let name = self.prompter.validated_input(
            "Image name (lowercase letters, digits, '.', '_' or '-')",
            &validate_image_name,
        )?;

        store.update(DeploymentConfigUpdate::image_name(name.clone()))?;
        println!("  {} Image name saved: {}", "✓".green(), name.cyan());
        Ok(name)
    }

    /// `login` against `registry.dockerdeploy.cloud/{username}`
    pub async fn login(&self, credentials: &RegistryCredentials) -> Result<()> {
        let login = RegistryLogin::for_user(&credentials.username, &credentials.password);

        println!("{} {}", "Logging in to".blue(), login.registry().cyan());
        self.engine.login(&login).await?;
        println!("  {} Logged in", "✓".green());
        Ok(())
    }

    /// Build with all version tags, push the first, persist the base tag
    ///
    /// Only the primary (first) tag is pushed; the others exist locally.
    /// `tagBase` is written only after the push succeeded.
    pub async fn build_and_publish_image(
        &self,
        store: &mut ConfigStore,
        dockerfile: &Path,
        credentials: &RegistryCredentials,
        versions: &[String],
    ) -> Result<ImageTags> {
        if versions.is_empty() {
            return Err(BuildError::NoVersions.into());
        }

        let app_name = store
            .config()
            .image_name
            .clone()
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let tags = ImageTags::new(&credentials.username, &app_name, versions)?;
        let request = BuildRequest::new(dockerfile, &tags, self.arch);

        println!();
        println!("{}", format!("🔨 Building {}", app_name).green().bold());
        println!(
            "  → Dockerfile: {}",
            dockerfile.display().to_string().cyan()
        );
        if let Some(platform) = &request.platform {
            println!("  → Platform: {}", platform.cyan());
        }
        for tag in tags.all() {
            println!("  → Tag: {}", tag.cyan());
        }

        self.engine.build(&request).await?;

        println!();
        println!("{}", "📤 Pushing image...".blue().bold());
        self.engine.push(tags.primary()).await?;

        store.update(DeploymentConfigUpdate::tag_base(tags.base()))?;
        tracing::info!("Saved tag base {}", tags.base());

        Ok(tags)
    }
}
