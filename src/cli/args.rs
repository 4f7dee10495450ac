/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

use crate::builder::command::{DEFAULT_OUT_DIR, DEFAULT_PROGRAM};
use crate::builder::{Arch, Firmware};

/// rayboot-build — build the bootloader for `x86_64` or `aarch64`.
///
/// Requires a working Linux Rust toolchain.
#[derive(Debug, Parser)]
#[command(
    name = "rayboot-build",
    about = "Build the x86_64 or aarch64 bootloader through `cargo builder`",
    long_about = None,
    version
)]
pub struct Cli {
    #[arg(
        help = "Kernel dependency manifest (Cargo.toml); x86_64 only",
        short = 'm',
        long = "kernel_manifest",
        alias = "kernel-manifest",
        value_name = "PATH"
    )]
    pub kernel_manifest: Option<String>,

    #[arg(
        help = "Kernel ELF binary; x86_64 only",
        short = 'b',
        long = "kernel_binary",
        alias = "kernel-binary",
        value_name = "PATH"
    )]
    pub kernel_binary: Option<String>,

    /// Target architecture (required).
    #[arg(short = 'a', long, value_name = "ARCH")]
    pub arch: Option<Arch>,

    /// Firmware type. Omit to build both UEFI and BIOS images.
    #[arg(short = 'f', long, value_name = "FIRMWARE")]
    pub firmware: Option<Firmware>,

    /// Directory the images are written to.
    #[arg(long, env = "RAYBOOT_OUT_DIR", default_value = DEFAULT_OUT_DIR, value_name = "DIR")]
    pub out_dir: String,

    /// Cargo executable used to run the builder.
    #[arg(long, env = "CARGO", default_value = DEFAULT_PROGRAM, value_name = "PATH")]
    pub cargo: String,

    /// Validate and print the build command without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format. Auto-detects: table when TTY, command when piped.
    #[arg(long, env = "RAYBOOT_OUTPUT", value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Log at debug level to stderr (`RUST_LOG` overrides).
    #[arg(long)]
    pub debug: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, command when piped.
    #[default]
    Auto,
    /// JSON object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Flag/value table plus the command line (human-readable).
    Table,
    /// The bare command line (for piping to a shell).
    Command,
}
