/// Assembly and execution of the `cargo builder` invocation.
use std::process::Command;

use serde::Serialize;
use tracing::info;

use super::errors::BuildError;
use super::request::BuildRequest;

/// Default build tool program.
pub const DEFAULT_PROGRAM: &str = "cargo";

/// Cargo alias that builds the bootloader images.
pub const BUILDER_SUBCOMMAND: &str = "builder";

/// Default directory the images are written to.
pub const DEFAULT_OUT_DIR: &str = "out_dir";

/// Fixed parts of the invocation that do not come from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub program: String,
    pub out_dir: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            out_dir: DEFAULT_OUT_DIR.to_owned(),
        }
    }
}

/// A fully assembled build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
}

impl BuildCommand {
    /// Assemble the invocation for a validated request.
    ///
    /// Order: base `builder --out-dir <dir>`, `--arch`, `--firmware` if set,
    /// then `--kernel-manifest` and `--kernel-binary` if the request carries a
    /// kernel.
    #[must_use]
    pub fn assemble(request: &BuildRequest, settings: &BuildSettings) -> Self {
        let mut args = vec![
            BUILDER_SUBCOMMAND.to_owned(),
            "--out-dir".to_owned(),
            settings.out_dir.clone(),
            "--arch".to_owned(),
            request.arch.as_str().to_owned(),
        ];

        if let Some(firmware) = request.firmware {
            args.push("--firmware".to_owned());
            args.push(firmware.as_str().to_owned());
        }

        if let Some(kernel) = &request.kernel {
            args.push("--kernel-manifest".to_owned());
            args.push(kernel.manifest.clone());
            args.push("--kernel-binary".to_owned());
            args.push(kernel.binary.clone());
        }

        Self {
            program: settings.program.clone(),
            args,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render as a single shell command line, quoting where needed.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|a| shell_quote(a))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the build tool to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Spawn` if the program cannot be started, and
    /// `BuildError::BuildFailed` if it exits unsuccessfully.
    pub fn execute(&self) -> Result<(), BuildError> {
        info!(command = %self.command_line(), "running build tool");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::BuildFailed {
                code: status.code(),
            })
        }
    }
}

/// POSIX single-quote `arg` unless it only contains shell-safe characters.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        arg.to_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::request::{Arch, Firmware};

    fn build(
        arch: Arch,
        firmware: Option<Firmware>,
        manifest: Option<&str>,
        binary: Option<&str>,
    ) -> BuildCommand {
        let req = BuildRequest::new(
            Some(arch),
            firmware,
            manifest.map(str::to_owned),
            binary.map(str::to_owned),
        )
        .unwrap();
        BuildCommand::assemble(&req, &BuildSettings::default())
    }

    fn count(cmd: &BuildCommand, flag: &str) -> usize {
        cmd.args().iter().filter(|a| *a == flag).count()
    }

    #[test]
    fn test_aarch64_only() {
        let cmd = build(Arch::Aarch64, None, None, None);
        assert_eq!(
            cmd.command_line(),
            "cargo builder --out-dir out_dir --arch aarch64"
        );
    }

    #[test]
    fn test_aarch64_uefi() {
        let cmd = build(Arch::Aarch64, Some(Firmware::Uefi), None, None);
        assert_eq!(
            cmd.command_line(),
            "cargo builder --out-dir out_dir --arch aarch64 --firmware UEFI"
        );
    }

    #[test]
    fn test_x86_64_with_kernel() {
        let cmd = build(Arch::X86_64, None, Some("Cargo.toml"), Some("kernel.elf"));
        assert_eq!(
            cmd.command_line(),
            "cargo builder --out-dir out_dir --arch x86_64 \
             --kernel-manifest Cargo.toml --kernel-binary kernel.elf"
        );
        assert_eq!(count(&cmd, "--kernel-manifest"), 1);
        assert_eq!(count(&cmd, "--kernel-binary"), 1);
    }

    #[test]
    fn test_x86_64_bios_flag_order() {
        let cmd = build(Arch::X86_64, Some(Firmware::Bios), Some("k/Cargo.toml"), Some("k.elf"));
        assert_eq!(
            cmd.args(),
            [
                "builder",
                "--out-dir",
                "out_dir",
                "--arch",
                "x86_64",
                "--firmware",
                "BIOS",
                "--kernel-manifest",
                "k/Cargo.toml",
                "--kernel-binary",
                "k.elf",
            ]
        );
    }

    #[test]
    fn test_aarch64_never_forwards_kernel() {
        let cmd = build(Arch::Aarch64, Some(Firmware::Bios), Some("Cargo.toml"), Some("kernel.elf"));
        assert_eq!(count(&cmd, "--kernel-manifest"), 0);
        assert_eq!(count(&cmd, "--kernel-binary"), 0);
        assert_eq!(count(&cmd, "--firmware"), 1);
    }

    #[test]
    fn test_firmware_absent_when_omitted() {
        let cmd = build(Arch::X86_64, None, Some("Cargo.toml"), Some("kernel.elf"));
        assert_eq!(count(&cmd, "--firmware"), 0);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let a = build(Arch::X86_64, Some(Firmware::Uefi), Some("Cargo.toml"), Some("kernel.elf"));
        let b = build(Arch::X86_64, Some(Firmware::Uefi), Some("Cargo.toml"), Some("kernel.elf"));
        assert_eq!(a, b);
        assert_eq!(a.command_line(), b.command_line());
    }

    #[test]
    fn test_custom_settings() {
        let req = BuildRequest::new(Some(Arch::Aarch64), None, None, None).unwrap();
        let settings = BuildSettings {
            program: "/opt/cargo/bin/cargo".to_owned(),
            out_dir: "build/images".to_owned(),
        };
        let cmd = BuildCommand::assemble(&req, &settings);
        assert_eq!(cmd.program(), "/opt/cargo/bin/cargo");
        assert_eq!(&cmd.args()[..3], ["builder", "--out-dir", "build/images"]);
    }

    #[test]
    fn test_paths_forwarded_literally_and_quoted_for_display() {
        let cmd = build(Arch::X86_64, None, Some("my kernel/Cargo.toml"), Some("it's.elf"));
        assert!(cmd.args().iter().any(|a| a == "my kernel/Cargo.toml"));
        assert!(
            cmd.command_line()
                .ends_with("--kernel-manifest 'my kernel/Cargo.toml' --kernel-binary 'it'\\''s.elf'")
        );
    }

    #[test]
    fn test_shell_quote_empty() {
        assert_eq!(shell_quote(""), "''");
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_success() {
        let req = BuildRequest::new(Some(Arch::Aarch64), None, None, None).unwrap();
        let settings = BuildSettings {
            program: "true".to_owned(),
            ..BuildSettings::default()
        };
        assert!(BuildCommand::assemble(&req, &settings).execute().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_propagates_failure() {
        let req = BuildRequest::new(Some(Arch::Aarch64), None, None, None).unwrap();
        let settings = BuildSettings {
            program: "false".to_owned(),
            ..BuildSettings::default()
        };
        let err = BuildCommand::assemble(&req, &settings).execute().unwrap_err();
        assert!(matches!(err, BuildError::BuildFailed { code: Some(1) }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_execute_missing_program() {
        let req = BuildRequest::new(Some(Arch::Aarch64), None, None, None).unwrap();
        let settings = BuildSettings {
            program: "rayboot-build-no-such-program".to_owned(),
            ..BuildSettings::default()
        };
        let err = BuildCommand::assemble(&req, &settings).execute().unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
        assert_eq!(err.exit_code(), 127);
    }
}
