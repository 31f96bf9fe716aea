//! Container engine CLI wrapper
//!
//! Wraps the `docker` (or compatible) executable: version probe, emulator
//! install, registry login, build and push.

use crate::auth::RegistryLogin;
use crate::error::{BuildError, BuildResult};
use crate::platform::HostArch;
use crate::progress::StepProgress;
use crate::runner::{CommandSpec, ProcessOutput, ProcessRunner};
use crate::tag::ImageTags;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Engine executable used when `DOCKERDEPLOY_ENGINE` is unset
pub const DEFAULT_ENGINE: &str = "docker";

/// Environment variable overriding the engine executable
pub const ENGINE_ENV: &str = "DOCKERDEPLOY_ENGINE";

/// Registers QEMU binfmt handlers with the engine (needs a privileged container)
pub const EMULATOR_INSTALL_ARGS: [&str; 6] = [
    "run",
    "--privileged",
    "--rm",
    "tonistiigi/binfmt",
    "--install",
    "all",
];

/// Inputs of one `build` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub dockerfile: PathBuf,
    pub tags: Vec<String>,
    pub platform: Option<String>,
    pub context: PathBuf,
}

impl BuildRequest {
    /// Build of `dockerfile` in the current directory, tagged with every tag
    pub fn new(dockerfile: impl Into<PathBuf>, tags: &ImageTags, arch: HostArch) -> Self {
        Self {
            dockerfile: dockerfile.into(),
            tags: tags.all().to_vec(),
            platform: arch.build_platform().map(str::to_string),
            context: PathBuf::from("."),
        }
    }

    /// `build -f <file> [--platform <p>] -t <tag> [-t <tag> ...] <context>`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-f".to_string(),
            self.dockerfile.display().to_string(),
        ];

        if let Some(platform) = &self.platform {
            args.push("--platform".to_string());
            args.push(platform.clone());
        }

        for tag in &self.tags {
            args.push("-t".to_string());
            args.push(tag.clone());
        }

        args.push(self.context.display().to_string());
        args
    }
}

/// Handle to the container engine executable
#[derive(Clone)]
pub struct ContainerEngine {
    program: String,
    runner: Arc<dyn ProcessRunner>,
}

impl ContainerEngine {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: DEFAULT_ENGINE.to_string(),
            runner,
        }
    }

    /// Engine named by `DOCKERDEPLOY_ENGINE`, falling back to `docker`
    pub fn from_env(runner: Arc<dyn ProcessRunner>) -> Self {
        match std::env::var(ENGINE_ENV) {
            Ok(program) if !program.trim().is_empty() => {
                Self::new(runner).with_program(program.trim())
            }
            _ => Self::new(runner),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(self.program.clone(), args)
    }

    /// Fail unless `<engine> version` succeeds
    pub async fn ensure_running(&self) -> BuildResult<()> {
        let output = self
            .runner
            .run(&self.command(["version"]))
            .await
            .map_err(|e| {
                BuildError::EngineUnavailable(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.success() {
            let reason = output.diagnostics().map(str::to_string).unwrap_or_else(|| {
                format!("`{} version` exited with {}", self.program, output.exit_code)
            });
            return Err(BuildError::EngineUnavailable(reason));
        }

        tracing::debug!("{} is reachable", self.program);
        Ok(())
    }

    /// Install cross-architecture emulation into the engine
    pub async fn install_emulator(&self) -> BuildResult<()> {
        let output = self
            .run_reported(self.command(EMULATOR_INSTALL_ARGS), "Installing emulator")
            .await
            .map_err(BuildError::EmulatorInstallFailed)?;

        tracing::info!("Emulator installed ({} bytes of output)", output.stdout.len());
        Ok(())
    }

    /// `login <registry> -u <user> --password-stdin`
    pub async fn login(&self, login: &RegistryLogin) -> BuildResult<()> {
        let command = self.command(login.args()).with_stdin(login.password());

        let output = self
            .runner
            .run(&command)
            .await
            .map_err(|e| BuildError::LoginFailed {
                registry: login.registry().to_string(),
                message: e.to_string(),
            })?;

        if !output.success() {
            return Err(BuildError::LoginFailed {
                registry: login.registry().to_string(),
                message: output
                    .diagnostics()
                    .unwrap_or("login command failed")
                    .to_string(),
            });
        }

        tracing::info!("Logged in to {}", login.registry());
        Ok(())
    }

    /// Build the image with all requested tags in one invocation
    pub async fn build(&self, request: &BuildRequest) -> BuildResult<()> {
        let command = self.command(request.args());

        self.run_reported(command, "Building image")
            .await
            .map_err(BuildError::BuildFailed)?;

        tracing::info!("Successfully built: {}", request.tags.join(", "));
        Ok(())
    }

    /// Push a single tag
    pub async fn push(&self, tag: &str) -> BuildResult<()> {
        println!("  → {}", tag.cyan());

        self.run_reported(self.command(["push", tag]), "Pushing image")
            .await
            .map_err(|message| BuildError::PushFailed {
                tag: tag.to_string(),
                message,
            })?;

        tracing::info!("Pushed {}", tag);
        Ok(())
    }

    /// Run with a spinner and report the outcome to the terminal
    ///
    /// Success with diagnostic output prints it as a warning. Failure prints
    /// the diagnostics and returns a short reason.
    async fn run_reported(
        &self,
        command: CommandSpec,
        message: &str,
    ) -> Result<ProcessOutput, String> {
        tracing::debug!("Running: {}", command);
        let progress = StepProgress::new(message);

        let output = match self.runner.run(&command).await {
            Ok(output) => output,
            Err(e) => {
                progress.abandon();
                eprintln!("  {} {}", "✗".red().bold(), e);
                return Err(format!("failed to run {}: {}", self.program, e));
            }
        };

        if !output.success() {
            progress.abandon();
            let diagnostics = output.diagnostics().unwrap_or(output.stdout.trim());
            if !diagnostics.is_empty() {
                eprintln!("{}", diagnostics);
            }
            return Err(format!(
                "`{} {}` exited with status {}",
                self.program,
                command.args.first().map(String::as_str).unwrap_or(""),
                output.exit_code
            ));
        }

        progress.finish_success(message);
        if let Some(warnings) = output.diagnostics() {
            eprintln!("{}", warnings.dimmed());
        }

        Ok(output)
    }
}
