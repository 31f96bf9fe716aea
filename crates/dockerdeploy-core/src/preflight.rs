//! Checks run before anything is built

use crate::error::Result;
use crate::prompt::Prompter;
use colored::Colorize;
use dockerdeploy_build::{ContainerEngine, HostArch};
use std::path::Path;

/// Result of [`ensure_emulator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorStatus {
    /// ARM host, builds run natively
    NotNeeded,
    Declined,
    Installed,
    /// Installation was attempted and failed; building continues anyway
    Failed,
}

/// Whether the build file exists; prints a hint when it does not
pub fn dockerfile_exists(dockerfile: &Path) -> bool {
    if dockerfile.is_file() {
        return true;
    }

    println!(
        "{} Dockerfile not found: {}",
        "✗".red().bold(),
        dockerfile.display().to_string().cyan()
    );
    println!("  Pass the path with --file, e.g. `dockerdeploy publish --file docker/Dockerfile`");
    false
}

/// Fail unless the container engine answers
pub async fn ensure_engine_running(engine: &ContainerEngine) -> Result<()> {
    engine.ensure_running().await?;
    Ok(())
}

/// Offer to install the cross-architecture emulator on non-ARM hosts
///
/// Never fails: a refused prompt or a failed install only produces a warning,
/// since builds that do not need emulation still work.
pub async fn ensure_emulator(
    engine: &ContainerEngine,
    prompter: &dyn Prompter,
    arch: HostArch,
    assume_yes: bool,
) -> EmulatorStatus {
    if !arch.needs_emulator() {
        tracing::debug!("ARM host, skipping emulator setup");
        return EmulatorStatus::NotNeeded;
    }

    let install = if assume_yes {
        true
    } else {
        match prompter.confirm(
            "This machine is not ARM. Install the QEMU emulator to build linux/arm64 images?",
            true,
        ) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Emulator prompt failed: {}", e);
                false
            }
        }
    };

    if !install {
        return EmulatorStatus::Declined;
    }

    match engine.install_emulator().await {
        Ok(()) => EmulatorStatus::Installed,
        Err(e) => {
            tracing::warn!("Emulator installation failed: {}", e);
            println!("  {} {} (continuing)", "⚠".yellow(), e);
            EmulatorStatus::Failed
        }
    }
}
