/// Errors from the build front end.
use thiserror::Error;

use super::request::Arch;

/// Exit code for a rejected flag combination. Matches clap's usage error code.
pub const EXIT_USAGE: i32 = 2;

/// Exit code when the build tool cannot be started (shell convention).
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Errors that can occur between flag validation and the end of the build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `--arch` was not given.
    #[error("Target architecture is required (pass --arch aarch64 or --arch x86_64)")]
    MissingArch,

    /// An architecture that needs kernel artifacts was selected without them.
    #[error("--arch {arch} requires {}", missing.join(" and "))]
    MissingKernelArtifacts {
        /// The selected architecture.
        arch: Arch,
        /// Flags that were not supplied, e.g. `--kernel_manifest`.
        missing: Vec<&'static str>,
    },

    /// The build tool could not be started at all.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was attempted.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The build tool ran and reported failure.
    #[error("Build failed ({})", describe_exit(*code))]
    BuildFailed {
        /// Exit code of the build tool, or `None` if it was killed by a signal.
        code: Option<i32>,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_owned(),
        |c| format!("exit code {c}"),
    )
}

/// Exit code mapping for `BuildError` variants.
impl BuildError {
    /// Return the CLI exit code for this error.
    ///
    /// A failed build passes the tool's own exit code through.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArch | Self::MissingKernelArtifacts { .. } => EXIT_USAGE,
            Self::Spawn { .. } => EXIT_SPAWN_FAILED,
            Self::BuildFailed { code } => match code {
                Some(0) | None => 1,
                Some(c) => *c,
            },
        }
    }

    /// Whether this error was raised before anything was executed.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingArch | Self::MissingKernelArtifacts { .. })
    }
}
