//! Deferred command substitution
//!
//! `$(command ...)`: run a composed invocation at launch time and use its
//! standard output as the value. Until then it is an inert record.

use crate::substitution::expression::{ComposedExpression, ExpressionComposer};
use serde::Serialize;

/// How a successful command's non-empty stderr is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandErrorMode {
    /// Fail the launch
    #[default]
    Strict,
    /// Log a warning and keep stdout
    Warn,
    /// Keep stdout silently
    Ignore,
}

impl CommandErrorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandErrorMode::Strict => "strict",
            CommandErrorMode::Warn => "warn",
            CommandErrorMode::Ignore => "ignore",
        }
    }
}

impl std::str::FromStr for CommandErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(CommandErrorMode::Strict),
            "warn" => Ok(CommandErrorMode::Warn),
            "ignore" => Ok(CommandErrorMode::Ignore),
            other => Err(format!("Unknown command error mode: {}", other)),
        }
    }
}

/// A composed invocation whose stdout becomes a parameter value at launch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeferredCommand {
    expression: ComposedExpression,
    error_mode: CommandErrorMode,
}

impl DeferredCommand {
    pub fn new(expression: ComposedExpression) -> Self {
        Self {
            expression,
            error_mode: CommandErrorMode::default(),
        }
    }

    pub fn with_error_mode(mut self, error_mode: CommandErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Textual argument list, executable lookups left as `$(find-exec ...)`
    pub fn render(&self) -> String {
        self.expression.to_string()
    }

    pub fn expression(&self) -> &ComposedExpression {
        &self.expression
    }

    pub fn error_mode(&self) -> CommandErrorMode {
        self.error_mode
    }
}

impl From<ComposedExpression> for DeferredCommand {
    fn from(expression: ComposedExpression) -> Self {
        Self::new(expression)
    }
}

impl From<&ExpressionComposer> for DeferredCommand {
    fn from(composer: &ExpressionComposer) -> Self {
        Self::new(composer.compose())
    }
}
