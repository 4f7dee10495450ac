/// Output formatting: JSON, table and command-line modes. TTY detection.
use std::io::{self, IsTerminal, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::types::{BuildPlanOutput, BuildResultOutput, ErrorOutput};

/// Informational line printed to stdout before the flags are parsed.
///
/// Shaped as a shell comment so `--output command | sh` still works. JSON
/// consumers skip this first line.
pub const BANNER: &str = "# rayboot-build: pass --help for detailed usage";

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
///
/// Piped stdout resolves to `Command`, which stays valid shell input after
/// the banner.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Command
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
        }
    }

    /// Start a named timer that logs the elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }

    fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Compact)
    }
}

// --- Build plan ---

/// Write the planned invocation to `out`.
///
/// # Errors
///
/// Returns any I/O error from `out`, or a JSON serialization failure.
pub fn write_plan<W: Write>(
    out: &mut W,
    plan: &BuildPlanOutput,
    ctx: &OutputCtx,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(plan).map_err(io::Error::other)?)
        }
        OutputFormat::Compact => {
            writeln!(out, "{}", serde_json::to_string(plan).map_err(io::Error::other)?)
        }
        OutputFormat::Command => writeln!(out, "{}", plan.command_line),
        OutputFormat::Table | OutputFormat::Auto => write_plan_table(out, plan),
    }
}

fn write_plan_table<W: Write>(out: &mut W, plan: &BuildPlanOutput) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["SETTING", "VALUE"]);
    table.add_row(["arch", plan.arch.as_str()]);
    table.add_row([
        "firmware",
        plan.firmware.as_deref().unwrap_or("UEFI + BIOS"),
    ]);
    if let Some(manifest) = &plan.kernel_manifest {
        table.add_row(["kernel manifest", manifest.as_str()]);
    }
    if let Some(binary) = &plan.kernel_binary {
        table.add_row(["kernel binary", binary.as_str()]);
    }
    writeln!(out, "{table}")?;
    writeln!(out, "{}", plan.command_line)
}

// --- Build result ---

/// Write the result of a finished build. Text modes stay quiet; the build
/// tool's own output is the report.
pub fn write_result(result: &BuildResultOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Compact => print_compact_json(result),
        OutputFormat::Table | OutputFormat::Command | OutputFormat::Auto => {}
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, ctx: &OutputCtx) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if ctx.is_json() {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
        if err.error.code.starts_with("missing_") {
            let _ = writeln!(out, "  Run with --help for usage.");
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Silent unless debug logging is enabled.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }

    /// Time since the timer started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(label = self.label, "{ms:.2}ms");
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
