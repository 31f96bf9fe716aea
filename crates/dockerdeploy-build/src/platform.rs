//! Host architecture detection
//!
//! The deployment platform runs `linux/arm64`. Non-ARM hosts cross-build for
//! that platform and need an emulator registered with the engine.

/// Platform passed to `build --platform` on non-ARM hosts
pub const TARGET_PLATFORM: &str = "linux/arm64";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArch {
    Arm,
    NonArm,
}

impl HostArch {
    /// Architecture of the running binary
    pub fn current() -> Self {
        Self::from_arch(std::env::consts::ARCH)
    }

    /// Classify a Rust `target_arch` / `uname -m` style name
    pub fn from_arch(arch: &str) -> Self {
        match arch {
            "aarch64" | "arm64" | "arm" | "armv7" | "armv7l" | "armv8l" => HostArch::Arm,
            _ => HostArch::NonArm,
        }
    }

    pub fn is_arm(self) -> bool {
        matches!(self, HostArch::Arm)
    }

    /// `--platform` value for the build, `None` when building natively
    pub fn build_platform(self) -> Option<&'static str> {
        if self.is_arm() {
            None
        } else {
            Some(TARGET_PLATFORM)
        }
    }

    pub fn needs_emulator(self) -> bool {
        !self.is_arm()
    }
}
