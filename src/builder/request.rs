/// Validated build request: architecture, firmware and kernel artifacts.
use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use super::errors::BuildError;

/// Target CPU architecture of the bootloader image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Arch {
    /// 64-bit ARM. Boots the kernel itself; no kernel artifacts needed.
    #[value(name = "aarch64")]
    Aarch64,
    /// 64-bit x86. The kernel manifest and ELF are linked into the image.
    #[value(name = "x86_64")]
    X86_64,
}

impl Arch {
    /// Value passed to `--arch`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aarch64 => "aarch64",
            Self::X86_64 => "x86_64",
        }
    }

    /// Whether the image for this architecture embeds a kernel.
    #[must_use]
    pub fn needs_kernel(self) -> bool {
        matches!(self, Self::X86_64)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform boot interface the image targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Firmware {
    #[value(name = "UEFI")]
    Uefi,
    #[value(name = "BIOS")]
    Bios,
}

impl Firmware {
    /// Value passed to `--firmware`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uefi => "UEFI",
            Self::Bios => "BIOS",
        }
    }
}

impl fmt::Display for Firmware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel artifacts forwarded verbatim to the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelImage {
    /// Path to the kernel's `Cargo.toml`. Never opened here.
    pub manifest: String,
    /// Path to the kernel ELF.
    pub binary: String,
}

/// A build request that has passed validation.
///
/// `kernel` is `Some` exactly when `arch.needs_kernel()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub arch: Arch,
    /// `None` builds both UEFI and BIOS images.
    pub firmware: Option<Firmware>,
    pub kernel: Option<KernelImage>,
}

impl BuildRequest {
    /// Validate parsed flags into a request.
    ///
    /// Kernel paths supplied for an architecture that does not need them are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::MissingArch` if `arch` is `None`, and
    /// `BuildError::MissingKernelArtifacts` if the architecture needs a kernel
    /// and either path is missing.
    pub fn new(
        arch: Option<Arch>,
        firmware: Option<Firmware>,
        kernel_manifest: Option<String>,
        kernel_binary: Option<String>,
    ) -> Result<Self, BuildError> {
        let arch = arch.ok_or(BuildError::MissingArch)?;

        if !arch.needs_kernel() {
            if kernel_manifest.is_some() || kernel_binary.is_some() {
                debug!(%arch, "ignoring kernel manifest/binary");
            }
            return Ok(Self {
                arch,
                firmware,
                kernel: None,
            });
        }

        match (kernel_manifest, kernel_binary) {
            (Some(manifest), Some(binary)) => Ok(Self {
                arch,
                firmware,
                kernel: Some(KernelImage { manifest, binary }),
            }),
            (manifest, binary) => {
                let mut missing = Vec::with_capacity(2);
                if manifest.is_none() {
                    missing.push("--kernel_manifest");
                }
                if binary.is_none() {
                    missing.push("--kernel_binary");
                }
                Err(BuildError::MissingKernelArtifacts { arch, missing })
            }
        }
    }
}
