//! Resolved launch record data structures

use serde::{Deserialize, Serialize};

/// A worker process with every parameter resolved, ready to exec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub executable: String,
    pub package: String,
    pub name: String,
    pub output: String,
    pub params: Vec<(String, String)>,
    pub cmd: Vec<String>,
}

impl ProcessRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
