//! Launch-side resolution and record generation
//!
//! Consumes a [`ProcessSpec`] the way the process supervisor does: every
//! deferred value is evaluated once, bundles are merged in order, and the
//! worker's command line is generated.

use crate::{
    bundle::ParameterValue,
    error::GenerationError,
    package::{prefix_of_share, PackageIndex},
    process::ProcessSpec,
    record::{
        exec::{is_executable, CommandRunner, ExecutableLocator},
        types::ProcessRecord,
    },
    substitution::{split_arguments, CommandErrorMode, DeferredCommand},
};

pub struct RecordGenerator<'a> {
    index: &'a dyn PackageIndex,
    locator: &'a dyn ExecutableLocator,
    runner: &'a dyn CommandRunner,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(
        index: &'a dyn PackageIndex,
        locator: &'a dyn ExecutableLocator,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            index,
            locator,
            runner,
        }
    }

    pub fn generate_process_record(
        &self,
        spec: &ProcessSpec,
    ) -> Result<ProcessRecord, GenerationError> {
        let executable = self.resolve_executable_path(spec.package(), spec.executable())?;
        let params = self.resolve_parameters(spec)?;
        let name = spec.executable().to_string();
        let cmd = Self::generate_command(&executable, &name, &params);

        Ok(ProcessRecord {
            executable,
            package: spec.package().to_string(),
            name,
            output: spec.output().as_str().to_string(),
            params,
            cmd,
        })
    }

    /// Resolve and merge all bundles. A key in a later bundle replaces the
    /// earlier value in place.
    pub fn resolve_parameters(
        &self,
        spec: &ProcessSpec,
    ) -> Result<Vec<(String, String)>, GenerationError> {
        let mut merged: Vec<(String, String)> = Vec::new();
        for bundle in spec.parameters() {
            for (name, value) in bundle.iter() {
                let resolved = self.resolve_value(value)?;
                match merged.iter_mut().find(|(k, _)| k == name) {
                    Some(entry) => {
                        log::debug!("Parameter '{}' overridden by a later bundle", name);
                        entry.1 = resolved;
                    }
                    None => merged.push((name.to_string(), resolved)),
                }
            }
        }
        Ok(merged)
    }

    pub fn resolve_value(&self, value: &ParameterValue) -> Result<String, GenerationError> {
        match value {
            ParameterValue::Scalar { value } => Ok(value.to_string()),
            ParameterValue::Path { path } => Ok(path.display().to_string()),
            ParameterValue::Command { command } => self.evaluate_command(command),
        }
    }

    /// Run a deferred command and return its stdout.
    pub fn evaluate_command(&self, command: &DeferredCommand) -> Result<String, GenerationError> {
        let text = command
            .expression()
            .resolve(|name| self.locator.find_executable(name))?;
        let argv = split_arguments(&text)?;
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| GenerationError::CommandFailed("Empty command".to_string()))?;

        log::info!(
            "Evaluating command ({}): {}",
            command.error_mode().as_str(),
            text.trim_end()
        );
        let output = self
            .runner
            .run(program, args)
            .map_err(|e| GenerationError::CommandFailed(format!("{}: {}", program, e)))?;

        if !output.success() {
            return Err(GenerationError::TemplatingFailure {
                command: text.trim_end().to_string(),
                status: output.status,
                stderr: output.stderr_text(),
            });
        }

        let stderr = output.stderr_text();
        if !stderr.trim().is_empty() {
            match command.error_mode() {
                CommandErrorMode::Strict => {
                    return Err(GenerationError::CommandFailed(format!(
                        "{} wrote to stderr: {}",
                        program,
                        stderr.trim_end()
                    )))
                }
                CommandErrorMode::Warn => {
                    log::warn!("{} wrote to stderr: {}", program, stderr.trim_end())
                }
                CommandErrorMode::Ignore => {}
            }
        }

        String::from_utf8(output.stdout).map_err(|_| {
            GenerationError::CommandFailed(format!("{} produced non-UTF-8 output", program))
        })
    }

    /// `<prefix>/lib/<package>/<executable>`, derived from the share directory
    fn resolve_executable_path(
        &self,
        package: &str,
        executable: &str,
    ) -> Result<String, GenerationError> {
        let share = self.index.share_directory(package)?;
        let prefix = prefix_of_share(&share).ok_or_else(|| {
            GenerationError::IoError(format!(
                "Share directory {} has no install prefix",
                share.display()
            ))
        })?;

        let path = prefix.join("lib").join(package).join(executable);
        if !is_executable(&path) {
            return Err(GenerationError::ExecutableNotFound(format!(
                "{} (package {})",
                executable, package
            )));
        }
        Ok(path.display().to_string())
    }

    pub fn generate_command(
        executable: &str,
        name: &str,
        params: &[(String, String)],
    ) -> Vec<String> {
        let mut cmd = vec![
            executable.to_string(),
            "--ros-args".to_string(),
            "-r".to_string(),
            format!("__node:={}", name),
        ];
        for (key, value) in params {
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", key, value));
        }
        cmd
    }
}
