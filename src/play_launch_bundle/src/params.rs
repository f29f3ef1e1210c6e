//! Parameter file rendering

use crate::error::GenerationError;
use serde_yaml::{Mapping, Value};

/// Render resolved parameters in the ROS 2 parameter file layout:
///
/// ```yaml
/// node_name:
///   ros__parameters:
///     param1: value1
/// ```
pub fn render_params_file(
    node_name: &str,
    params: &[(String, String)],
) -> Result<String, GenerationError> {
    let mut ros_parameters = Mapping::new();
    for (name, value) in params {
        ros_parameters.insert(Value::String(name.clone()), string_to_yaml_value(value));
    }

    let mut node = Mapping::new();
    node.insert(
        Value::String("ros__parameters".to_string()),
        Value::Mapping(ros_parameters),
    );
    let mut root = Mapping::new();
    root.insert(Value::String(node_name.to_string()), Value::Mapping(node));

    serde_yaml::to_string(&Value::Mapping(root))
        .map_err(|e| GenerationError::IoError(format!("YAML serialize error: {}", e)))
}

/// Convert a string to the appropriate YAML value type
fn string_to_yaml_value(s: &str) -> Value {
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>() {
        if n.is_finite() {
            if let Ok(value) = serde_yaml::to_value(n) {
                return value;
            }
        }
    }

    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_layout() {
        let yaml = render_params_file(
            "hello_moveit_smk",
            &[("robot_description".to_string(), "<robot name=\"ur\"/>".to_string())],
        )
        .unwrap();

        let value = parse(&yaml);
        assert_eq!(
            value["hello_moveit_smk"]["ros__parameters"]["robot_description"],
            Value::String("<robot name=\"ur\"/>".to_string())
        );
    }

    #[test]
    fn test_scalar_coercion() {
        let yaml = render_params_file(
            "node",
            &[
                ("flag".to_string(), "true".to_string()),
                ("count".to_string(), "20".to_string()),
                ("margin".to_string(), "0.15".to_string()),
                ("ip".to_string(), "192.168.56.101".to_string()),
            ],
        )
        .unwrap();

        let params = &parse(&yaml)["node"]["ros__parameters"];
        assert_eq!(params["flag"], Value::Bool(true));
        assert_eq!(params["count"].as_i64(), Some(20));
        assert_eq!(params["margin"].as_f64(), Some(0.15));
        assert_eq!(params["ip"].as_str(), Some("192.168.56.101"));
    }

    #[test]
    fn test_multiline_value_preserved() {
        let xml = "<?xml version=\"1.0\"?>\n<robot name=\"ur\">\n  <link name=\"base\"/>\n</robot>\n";
        let yaml = render_params_file("node", &[("robot_description".to_string(), xml.to_string())]).unwrap();
        assert_eq!(
            parse(&yaml)["node"]["ros__parameters"]["robot_description"].as_str(),
            Some(xml)
        );
    }

    #[test]
    fn test_order_preserved() {
        let yaml = render_params_file(
            "node",
            &[
                ("z".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string()),
            ],
        )
        .unwrap();
        assert!(yaml.find("z:").unwrap() < yaml.find("a:").unwrap());
    }
}
