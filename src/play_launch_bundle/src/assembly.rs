//! Demo launch assembly
//!
//! Builds the three robot description parameters and the node declaration
//! that receives them. Package paths are resolved here; the xacro runs are
//! left to the launch side.

use crate::{
    bundle::{ParameterBundleBuilder, ParameterValue},
    config::AssemblyConfig,
    error::Result,
    package::PackageIndex,
    process::{OutputMode, ProcessSpec},
    substitution::{DeferredCommand, ExpressionComposer, Fragment},
};

pub const ROBOT_DESCRIPTION: &str = "robot_description";
pub const ROBOT_DESCRIPTION_SEMANTIC: &str = "robot_description_semantic";
pub const ROBOT_DESCRIPTION_KINEMATICS: &str = "robot_description_kinematics";

/// `xacro ur.urdf.xacro robot_ip:=... ur_type:=... prefix:=""`
pub fn robot_description(
    index: &dyn PackageIndex,
    config: &AssemblyConfig,
) -> Result<DeferredCommand> {
    let package = config.description_package.as_str();
    let config_file = |file: &str| index.share_path(package, &["config", config.ur_type.as_str(), file]);

    let template = index.share_path(package, &["urdf", "ur.urdf.xacro"])?;
    let mut composer = ExpressionComposer::new(&config.xacro_executable, Fragment::Path(template));
    composer
        .arg("robot_ip", config.robot_ip.as_str())?
        .arg("joint_limit_params", config_file("joint_limits.yaml")?)?
        .arg("kinematics_params", config_file("default_kinematics.yaml")?)?
        .arg("physical_params", config_file("physical_parameters.yaml")?)?
        .arg("visual_params", config_file("visual_parameters.yaml")?)?
        .arg("safety_limits", config.safety_limits.to_string())?
        .arg("safety_pos_margin", config.safety_pos_margin.to_string())?
        .arg("safety_k_position", config.safety_k_position.to_string())?
        .arg("name", config.name.as_str())?
        .arg("ur_type", config.ur_type.as_str())?
        .arg("prefix", config.prefix.as_str())?;

    Ok(DeferredCommand::from(&composer))
}

/// `xacro ur.srdf.xacro name:=... prefix:=""`
pub fn robot_description_semantic(
    index: &dyn PackageIndex,
    config: &AssemblyConfig,
) -> Result<DeferredCommand> {
    let template = index.share_path(&config.moveit_config_package, &["srdf", "ur.srdf.xacro"])?;
    let mut composer = ExpressionComposer::new(&config.xacro_executable, Fragment::Path(template));
    composer
        .arg("name", config.name.as_str())?
        .arg("prefix", config.prefix.as_str())?;

    Ok(DeferredCommand::from(&composer))
}

pub fn robot_description_kinematics(
    index: &dyn PackageIndex,
    config: &AssemblyConfig,
) -> Result<ParameterValue> {
    let path = index.share_path(&config.moveit_config_package, &["config", "kinematics.yaml"])?;
    Ok(ParameterValue::path(path))
}

/// Node declaration carrying all robot description parameters in one bundle
pub fn demo_node(index: &dyn PackageIndex, config: &AssemblyConfig) -> Result<ProcessSpec> {
    let mut builder = ParameterBundleBuilder::new();
    builder
        .add(ROBOT_DESCRIPTION, robot_description(index, config)?)?
        .add(
            ROBOT_DESCRIPTION_SEMANTIC,
            robot_description_semantic(index, config)?,
        )?
        .add(
            ROBOT_DESCRIPTION_KINEMATICS,
            robot_description_kinematics(index, config)?,
        )?;
    let bundle = builder.build();

    log::info!(
        "Assembled {} with {} parameters",
        config.node_executable,
        bundle.len()
    );

    Ok(ProcessSpec::new(
        &config.node_package,
        &config.node_executable,
        OutputMode::Screen,
        vec![bundle],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AssemblyError, error::SubstitutionError, package::StaticPackageIndex};
    use std::path::Path;

    fn index() -> StaticPackageIndex {
        StaticPackageIndex::new().with_prefix(
            Path::new("/opt/ros/humble"),
            &["ur_description", "ur_moveit_config", "hello_moveit_smk"],
        )
    }

    #[test]
    fn test_robot_description_render() {
        let command = robot_description(&index(), &AssemblyConfig::default()).unwrap();
        let expected = concat!(
            "$(find-exec xacro) /opt/ros/humble/share/ur_description/urdf/ur.urdf.xacro ",
            "robot_ip:=192.168.56.101 ",
            "joint_limit_params:=/opt/ros/humble/share/ur_description/config/ur5e/joint_limits.yaml ",
            "kinematics_params:=/opt/ros/humble/share/ur_description/config/ur5e/default_kinematics.yaml ",
            "physical_params:=/opt/ros/humble/share/ur_description/config/ur5e/physical_parameters.yaml ",
            "visual_params:=/opt/ros/humble/share/ur_description/config/ur5e/visual_parameters.yaml ",
            "safety_limits:=true ",
            "safety_pos_margin:=0.15 ",
            "safety_k_position:=20 ",
            "name:=ur ",
            "ur_type:=ur5e ",
            "prefix:=\"\" "
        );
        assert_eq!(command.render(), expected);
    }

    #[test]
    fn test_semantic_render() {
        let command = robot_description_semantic(&index(), &AssemblyConfig::default()).unwrap();
        assert_eq!(
            command.render(),
            "$(find-exec xacro) /opt/ros/humble/share/ur_moveit_config/srdf/ur.srdf.xacro name:=ur prefix:=\"\" "
        );
    }

    #[test]
    fn test_kinematics_path() {
        let value = robot_description_kinematics(&index(), &AssemblyConfig::default()).unwrap();
        assert_eq!(
            value,
            ParameterValue::path("/opt/ros/humble/share/ur_moveit_config/config/kinematics.yaml")
        );
    }

    #[test]
    fn test_missing_package_aborts() {
        let index = StaticPackageIndex::new().with_prefix(Path::new("/opt/ros/humble"), &["ur_description"]);
        let err = demo_node(&index, &AssemblyConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Substitution(SubstitutionError::PackageNotFound(ref name)) if name == "ur_moveit_config"
        ));
    }

    #[test]
    fn test_ur_type_selects_config_dir() {
        let config = AssemblyConfig {
            ur_type: "ur3e".to_string(),
            ..AssemblyConfig::default()
        };
        let rendered = robot_description(&index(), &config).unwrap().render();
        assert!(rendered.contains("/config/ur3e/joint_limits.yaml "));
        assert!(rendered.contains(" ur_type:=ur3e "));
    }
}
