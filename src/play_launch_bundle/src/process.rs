//! Process declaration handed to the launch side

use crate::bundle::ParameterBundle;
use serde::Serialize;

/// Where the worker's stdout/stderr go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Inherit the launching console
    #[default]
    Screen,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Screen => "screen",
        }
    }
}

/// Full description of one worker process launch
///
/// Built once by the assembly and consumed once by the launch side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSpec {
    package: String,
    executable: String,
    output: OutputMode,
    parameters: Vec<ParameterBundle>,
}

impl ProcessSpec {
    pub fn new(
        package: impl Into<String>,
        executable: impl Into<String>,
        output: OutputMode,
        parameters: Vec<ParameterBundle>,
    ) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            output,
            parameters,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    pub fn parameters(&self) -> &[ParameterBundle] {
        &self.parameters
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
