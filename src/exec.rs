//! External command execution.
//!
//! One seam for every subprocess snboot starts (jq, the install step, version
//! probes). Programs are resolved through `which`, so `npm` finds `npm.cmd` on
//! Windows the same way it finds `npm` elsewhere.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of a finished command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandRunner {
    /// Resolve a program name to an executable path.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion, capturing stdout and stderr.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput>;

    /// Run to completion with inherited stdio. Returns the exit code.
    fn stream(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<Option<i32>>;

    fn is_available(&self, program: &str) -> bool {
        self.locate(program).is_some()
    }
}

/// Runs real processes via `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<Command> {
        let resolved = self.locate(program).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program} not found on PATH"),
            )
        })?;
        let mut command = Command::new(resolved);
        command.args(args).current_dir(cwd);
        Ok(command)
    }
}

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput> {
        let output = self
            .command(program, args, cwd)?
            .stdin(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<Option<i32>> {
        let status = self.command(program, args, cwd)?.status()?;
        Ok(status.code())
    }
}

/// Render a command line for messages.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Directory a file lives in, `.` for bare file names.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_located() {
        let runner = SystemRunner;
        assert!(runner
            .locate("snboot-definitely-not-a-real-program")
            .is_none());
        assert!(!runner.is_available("snboot-definitely-not-a-real-program"));
    }

    #[test]
    fn test_running_missing_program_is_not_found() {
        let err = SystemRunner
            .run("snboot-definitely-not-a-real-program", &[], Path::new("."))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_display_command() {
        assert_eq!(display_command("npm", &["install"]), "npm install");
        assert_eq!(display_command("jq", &[]), "jq");
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("package.json")), Path::new("."));
        assert_eq!(
            parent_dir(Path::new("app/package.json")),
            Path::new("app")
        );
    }
}
