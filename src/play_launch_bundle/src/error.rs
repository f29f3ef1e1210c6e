//! Error types for play_launch_bundle

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Parameter bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstitutionError {
    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Substitution key '{0}' is given more than once")]
    DuplicateSubstitutionKey(String),

    #[error("Invalid substitution key '{0}'")]
    InvalidSubstitutionKey(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BundleError {
    #[error("Parameter '{0}' is already present in the bundle")]
    DuplicateParameterKey(String),

    #[error("Parameter bundle is frozen; no further parameters can be added")]
    BundleFrozen,
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("Templating command '{command}' failed (exit status: {status:?}): {stderr}")]
    TemplatingFailure {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, AssemblyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templating_failure_message() {
        let err = GenerationError::TemplatingFailure {
            command: "xacro ur.urdf.xacro".to_string(),
            status: Some(2),
            stderr: "No such file".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Some(2)"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_templating_failure_without_status() {
        let err = GenerationError::TemplatingFailure {
            command: "xacro".to_string(),
            status: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("exit status: None"));
    }

    #[test]
    fn test_assembly_error_from_bundle() {
        let err: AssemblyError = BundleError::BundleFrozen.into();
        assert!(matches!(err, AssemblyError::Bundle(BundleError::BundleFrozen)));
    }
}
