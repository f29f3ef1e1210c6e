//! Parameter bundles
//!
//! A bundle is an insertion-ordered, duplicate-free mapping from parameter
//! name to an unresolved [`ParameterValue`]. Bundles are collected with a
//! [`ParameterBundleBuilder`], which moves from open to frozen on `build()`.

use crate::{error::BundleError, substitution::DeferredCommand};
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::path::PathBuf;

/// Literal scalar parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            // `{:?}` keeps the trailing `.0`
            ScalarValue::Double(d) => write!(f, "{:?}", d),
            ScalarValue::String(s) => f.write_str(s),
        }
    }
}

/// Unresolved parameter value handed to the launch side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterValue {
    Scalar { value: ScalarValue },
    Command { command: DeferredCommand },
    Path { path: PathBuf },
}

impl ParameterValue {
    pub fn scalar(value: ScalarValue) -> Self {
        ParameterValue::Scalar { value }
    }

    pub fn command(command: impl Into<DeferredCommand>) -> Self {
        ParameterValue::Command {
            command: command.into(),
        }
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        ParameterValue::Path { path: path.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Scalar { .. } => "scalar",
            ParameterValue::Command { .. } => "command",
            ParameterValue::Path { .. } => "path",
        }
    }
}

impl From<ScalarValue> for ParameterValue {
    fn from(value: ScalarValue) -> Self {
        Self::scalar(value)
    }
}

impl From<DeferredCommand> for ParameterValue {
    fn from(command: DeferredCommand) -> Self {
        Self::command(command)
    }
}

/// Frozen, insertion-ordered parameter mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterBundle {
    entries: Vec<(String, ParameterValue)>,
}

impl ParameterBundle {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for ParameterBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Collects named values into a [`ParameterBundle`]
#[derive(Debug, Default)]
pub struct ParameterBundleBuilder {
    entries: Vec<(String, ParameterValue)>,
    frozen: Option<ParameterBundle>,
}

impl ParameterBundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Add a parameter. A rejected call leaves the builder unchanged.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Result<&mut Self, BundleError> {
        if self.frozen.is_some() {
            return Err(BundleError::BundleFrozen);
        }
        let name = name.into();
        if self.entries.iter().any(|(k, _)| *k == name) {
            return Err(BundleError::DuplicateParameterKey(name));
        }

        let value = value.into();
        log::debug!("Adding {} parameter '{}'", value.kind(), name);
        self.entries.push((name, value));
        Ok(self)
    }

    /// Freeze and return the snapshot. Repeated calls return the same snapshot.
    pub fn build(&mut self) -> ParameterBundle {
        if let Some(bundle) = &self.frozen {
            return bundle.clone();
        }
        let bundle = ParameterBundle {
            entries: std::mem::take(&mut self.entries),
        };
        self.frozen = Some(bundle.clone());
        bundle
    }

    /// Keys currently held, in insertion order
    pub fn keys(&self) -> Vec<&str> {
        match &self.frozen {
            Some(bundle) => bundle.keys().collect(),
            None => self.entries.iter().map(|(k, _)| k.as_str()).collect(),
        }
    }
}
