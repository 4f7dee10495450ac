/// Command dispatch: validate the flags, then plan or run the build.
pub mod build;
pub mod plan;

use tracing::debug;

use crate::builder::{BuildCommand, BuildError, BuildRequest, BuildSettings};
use crate::cli::{Cli, OutputCtx};

/// Dispatch parsed flags to `plan` (`--dry-run`) or `build`.
///
/// # Errors
///
/// Returns `BuildError` on invalid flag combinations or a failed build.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), BuildError> {
    let (request, command) = prepare(cli)?;
    if cli.dry_run {
        plan::run(&request, &command, ctx);
        Ok(())
    } else {
        build::run(&command, ctx)
    }
}

/// Validate the flags and assemble the build command.
///
/// # Errors
///
/// Returns a configuration `BuildError` if a required flag is missing.
pub fn prepare(cli: &Cli) -> Result<(BuildRequest, BuildCommand), BuildError> {
    let request = BuildRequest::new(
        cli.arch,
        cli.firmware,
        cli.kernel_manifest.clone(),
        cli.kernel_binary.clone(),
    )?;
    let settings = BuildSettings {
        program: cli.cargo.clone(),
        out_dir: cli.out_dir.clone(),
    };
    let command = BuildCommand::assemble(&request, &settings);
    debug!(?request, command = %command.command_line(), "assembled build command");
    Ok((request, command))
}
