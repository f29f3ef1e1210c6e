//! Executable lookup and command execution used at launch time

use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Finds executables named by `$(find-exec ...)`
pub trait ExecutableLocator {
    fn find_executable(&self, name: &str) -> Option<PathBuf>;
}

/// Captured result of one command run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs a program to completion and captures its output
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Searches a list of directories, `PATH` by default
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    dirs: Vec<PathBuf>,
}

impl PathLocator {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        Self::new(dirs)
    }
}

impl ExecutableLocator for PathLocator {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        if name.contains('/') {
            let path = PathBuf::from(name);
            return is_executable(&path).then_some(path);
        }

        let found = self
            .dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate));
        match &found {
            Some(path) => log::debug!("Found executable {} at {}", name, path.display()),
            None => log::debug!("Executable {} not found on search path", name),
        }
        found
    }
}

#[cfg(unix)]
pub(crate) fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub(crate) fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Runs commands with `std::process::Command`, stdin closed
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        log::debug!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_locator_finds_first_match() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_executable(second.path(), "xacro", "#!/bin/sh\n");
        let expected = write_executable(first.path(), "xacro", "#!/bin/sh\n");

        let locator = PathLocator::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(locator.find_executable("xacro"), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn test_locator_skips_non_executable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("xacro"), "not a program").unwrap();

        let locator = PathLocator::new(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.find_executable("xacro"), None);
    }

    #[test]
    fn test_locator_empty_name() {
        let locator = PathLocator::new(vec![PathBuf::from("/usr/bin")]);
        assert_eq!(locator.find_executable(""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() {
        let output = SystemRunner
            .run(
                "/bin/sh",
                &["-c".to_string(), "printf out; printf err >&2; exit 3".to_string()],
            )
            .unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr_text(), "err");
        assert!(!output.success());
    }

    #[test]
    fn test_system_runner_missing_program() {
        let result = SystemRunner.run("/nonexistent/definitely_not_here", &[]);
        assert!(result.is_err());
    }
}
