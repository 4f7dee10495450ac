/// Default command: run `cargo builder` and wait for it.
use crate::builder::{BuildCommand, BuildError};
use crate::cli::OutputCtx;
use crate::cli::output::write_result;
use crate::types::BuildResultOutput;

/// Run the build tool to completion.
///
/// # Errors
///
/// Returns `BuildError::Spawn` if the tool cannot be started and
/// `BuildError::BuildFailed` if it exits non-zero.
pub fn run(command: &BuildCommand, ctx: &OutputCtx) -> Result<(), BuildError> {
    let timer = ctx.timer("cargo builder");
    command.execute()?;
    let elapsed_ms = timer.elapsed().as_millis();
    drop(timer);

    write_result(
        &BuildResultOutput {
            ok: true,
            command_line: command.command_line(),
            elapsed_ms,
        },
        ctx,
    );
    Ok(())
}
