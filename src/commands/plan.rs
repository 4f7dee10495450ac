/// `--dry-run`: print the validated build command without running it.
use crate::builder::{BuildCommand, BuildRequest};
use crate::cli::OutputCtx;
use crate::cli::output::write_plan;
use crate::types::BuildPlanOutput;

/// Print the plan for `request` to stdout.
pub fn run(request: &BuildRequest, command: &BuildCommand, ctx: &OutputCtx) {
    let plan = BuildPlanOutput::new(request, command);
    if let Err(e) = write_plan(&mut std::io::stdout().lock(), &plan, ctx) {
        eprintln!("Failed to write build plan: {e}");
    }
}
