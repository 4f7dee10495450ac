/// Shared serializable output types.
///
/// These types are what gets written to stdout/stderr — either as JSON or
/// rendered as text. They are decoupled from the `builder` domain types.
use serde::{Deserialize, Serialize};

use crate::builder::{BuildCommand, BuildError, BuildRequest};

/// The planned invocation, as printed by `--dry-run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlanOutput {
    /// Target architecture (`aarch64` or `x86_64`).
    pub arch: String,
    /// Firmware type, or null when both UEFI and BIOS images are built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
    /// Kernel manifest path (`x86_64` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_manifest: Option<String>,
    /// Kernel ELF path (`x86_64` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel_binary: Option<String>,
    /// Build tool program.
    pub program: String,
    /// Arguments passed to the program, in order.
    pub args: Vec<String>,
    /// The whole invocation as a shell command line.
    pub command_line: String,
}

impl BuildPlanOutput {
    #[must_use]
    pub fn new(request: &BuildRequest, command: &BuildCommand) -> Self {
        Self {
            arch: request.arch.to_string(),
            firmware: request.firmware.map(|f| f.to_string()),
            kernel_manifest: request.kernel.as_ref().map(|k| k.manifest.clone()),
            kernel_binary: request.kernel.as_ref().map(|k| k.binary.clone()),
            program: command.program().to_owned(),
            args: command.args().to_vec(),
            command_line: command.command_line(),
        }
    }
}

/// Result of a completed build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResultOutput {
    /// Always `true`; failures use `ErrorOutput`.
    pub ok: bool,
    /// The invocation that ran.
    pub command_line: String,
    /// Wall-clock build time in milliseconds.
    pub elapsed_ms: u128,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Flags that must be supplied (for missing-flag errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    /// Exit code of the build tool, if it ran and failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_exit_code: Option<i32>,
}

impl ErrorOutput {
    /// Construct from a `BuildError`.
    #[must_use]
    pub fn from_build_error(err: &BuildError) -> Self {
        let (code, missing, tool_exit_code) = match err {
            BuildError::MissingArch => ("missing_arch", Some(vec!["--arch".to_owned()]), None),
            BuildError::MissingKernelArtifacts { missing, .. } => (
                "missing_kernel_artifacts",
                Some(missing.iter().map(|m| (*m).to_owned()).collect()),
                None,
            ),
            BuildError::Spawn { .. } => ("spawn_failed", None, None),
            BuildError::BuildFailed { code } => ("build_failed", None, *code),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                missing,
                tool_exit_code,
            },
        }
    }
}
