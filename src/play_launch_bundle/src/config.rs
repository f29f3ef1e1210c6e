//! Assembly configuration
//!
//! Every field defaults to the values the demo launch ships with, so an
//! empty YAML document (or no file at all) reproduces it exactly.

use crate::error::{AssemblyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblyConfig {
    pub robot_ip: String,
    pub ur_type: String,
    pub name: String,
    /// Joint name prefix; empty is passed to xacro as an explicit `""`
    pub prefix: String,
    pub safety_limits: bool,
    pub safety_pos_margin: f64,
    pub safety_k_position: i64,
    pub description_package: String,
    pub moveit_config_package: String,
    pub node_package: String,
    pub node_executable: String,
    pub xacro_executable: String,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            robot_ip: "192.168.56.101".to_string(),
            ur_type: "ur5e".to_string(),
            name: "ur".to_string(),
            prefix: String::new(),
            safety_limits: true,
            safety_pos_margin: 0.15,
            safety_k_position: 20,
            description_package: "ur_description".to_string(),
            moveit_config_package: "ur_moveit_config".to_string(),
            node_package: "hello_moveit_smk".to_string(),
            node_executable: "hello_moveit_smk".to_string(),
            xacro_executable: "xacro".to_string(),
        }
    }
}

impl AssemblyConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| AssemblyError::Config(format!("YAML parse error: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loaded assembly config from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Apply a `key:=value` launch argument to the matching field.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "robot_ip" => self.robot_ip = value.to_string(),
            "ur_type" => self.ur_type = value.to_string(),
            "name" => self.name = value.to_string(),
            "prefix" => self.prefix = value.to_string(),
            "safety_limits" => self.safety_limits = parse_value(key, value, "bool")?,
            "safety_pos_margin" => self.safety_pos_margin = parse_value(key, value, "float")?,
            "safety_k_position" => self.safety_k_position = parse_value(key, value, "integer")?,
            "description_package" => self.description_package = value.to_string(),
            "moveit_config_package" => self.moveit_config_package = value.to_string(),
            "node_package" => self.node_package = value.to_string(),
            "node_executable" => self.node_executable = value.to_string(),
            "xacro_executable" => self.xacro_executable = value.to_string(),
            other => {
                return Err(AssemblyError::Config(format!(
                    "Unknown launch argument '{}'",
                    other
                )))
            }
        }
        log::debug!("Launch argument {}:={}", key, value);
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T> {
    value.parse().map_err(|_| {
        AssemblyError::Config(format!(
            "Launch argument '{}' expects {}, got '{}'",
            key, expected, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AssemblyConfig::default();
        assert_eq!(config.robot_ip, "192.168.56.101");
        assert_eq!(config.prefix, "");
        assert_eq!(config.safety_k_position, 20);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            AssemblyConfig::from_yaml_str("").unwrap(),
            AssemblyConfig::default()
        );
    }

    #[test]
    fn test_partial_yaml() {
        let config = AssemblyConfig::from_yaml_str("robot_ip: 10.0.0.2\nur_type: ur3e\n").unwrap();
        assert_eq!(config.robot_ip, "10.0.0.2");
        assert_eq!(config.ur_type, "ur3e");
        assert_eq!(config.name, "ur");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = AssemblyConfig::from_yaml_str("robot_port: 5000\n");
        assert!(matches!(result, Err(AssemblyError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"safety_pos_margin: 0.2\n").unwrap();
        file.flush().unwrap();

        let config = AssemblyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.safety_pos_margin, 0.2);
    }

    #[test]
    fn test_apply_override() {
        let mut config = AssemblyConfig::default();
        config.apply_override("robot_ip", "127.0.0.1").unwrap();
        config.apply_override("safety_limits", "false").unwrap();
        config.apply_override("safety_k_position", "15").unwrap();
        assert_eq!(config.robot_ip, "127.0.0.1");
        assert!(!config.safety_limits);
        assert_eq!(config.safety_k_position, 15);
    }

    #[test]
    fn test_override_type_error() {
        let mut config = AssemblyConfig::default();
        let err = config.apply_override("safety_pos_margin", "wide").unwrap_err();
        assert!(err.to_string().contains("expects float"));
        assert_eq!(config.safety_pos_margin, 0.15);
    }

    #[test]
    fn test_override_unknown_key() {
        let mut config = AssemblyConfig::default();
        assert!(config.apply_override("use_fake_hardware", "true").is_err());
    }
}
