//! Package share-directory lookup
//!
//! A package name resolves to `<prefix>/share/<name>` of the install prefix
//! that registers it in the ament resource index.

use crate::error::SubstitutionError;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Marker directory of the ament resource index, relative to an install prefix
const PACKAGES_RESOURCE_DIR: &str = "share/ament_index/resource_index/packages";

/// Lookup from package name to its installed share directory
pub trait PackageIndex {
    /// Absolute share directory of `package`, or `PackageNotFound`.
    fn share_directory(&self, package: &str) -> Result<PathBuf, SubstitutionError>;

    /// Join a package-relative subpath onto the package's share directory.
    fn share_path(&self, package: &str, segments: &[&str]) -> Result<PathBuf, SubstitutionError> {
        let mut path = self.share_directory(package)?;
        for segment in segments {
            path.push(segment);
        }
        Ok(path)
    }
}

/// Installation index backed by ament prefixes on disk
#[derive(Debug, Clone)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Read the prefix list from `AMENT_PREFIX_PATH`.
    pub fn from_env() -> Self {
        let prefixes = std::env::var_os("AMENT_PREFIX_PATH")
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        Self::new(prefixes)
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    fn is_registered(prefix: &Path, package: &str) -> bool {
        prefix.join(PACKAGES_RESOURCE_DIR).join(package).is_file()
    }
}

impl PackageIndex for AmentIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, SubstitutionError> {
        if package.is_empty() {
            return Err(SubstitutionError::PackageNotFound(package.to_string()));
        }

        for prefix in &self.prefixes {
            if !prefix.is_absolute() {
                log::debug!("Ignoring relative ament prefix {}", prefix.display());
                continue;
            }
            if Self::is_registered(prefix, package) {
                let share = prefix.join("share").join(package);
                log::debug!("Package '{}' found at {}", package, share.display());
                return Ok(share);
            }
        }

        Err(SubstitutionError::PackageNotFound(package.to_string()))
    }
}

/// In-memory index mapping package names to share directories
#[derive(Debug, Clone, Default)]
pub struct StaticPackageIndex {
    packages: HashMap<String, PathBuf>,
}

impl StaticPackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: impl Into<String>, share: impl Into<PathBuf>) -> Self {
        self.packages.insert(name.into(), share.into());
        self
    }

    /// Register every package under the standard layout of one install prefix.
    pub fn with_prefix(mut self, prefix: &Path, names: &[&str]) -> Self {
        for name in names {
            self.packages
                .insert(name.to_string(), prefix.join("share").join(name));
        }
        self
    }
}

impl PackageIndex for StaticPackageIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf, SubstitutionError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| SubstitutionError::PackageNotFound(package.to_string()))
    }
}

/// Install prefix of a package, given its share directory `<prefix>/share/<name>`
pub fn prefix_of_share(share: &Path) -> Option<&Path> {
    share.parent().and_then(Path::parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn register(prefix: &Path, package: &str) {
        let marker_dir = prefix.join(PACKAGES_RESOURCE_DIR);
        fs::create_dir_all(&marker_dir).unwrap();
        fs::write(marker_dir.join(package), "").unwrap();
        fs::create_dir_all(prefix.join("share").join(package)).unwrap();
    }

    #[test]
    fn test_ament_index_finds_registered_package() {
        let prefix = TempDir::new().unwrap();
        register(prefix.path(), "ur_description");

        let index = AmentIndex::new(vec![prefix.path().to_path_buf()]);
        let share = index.share_directory("ur_description").unwrap();
        assert_eq!(share, prefix.path().join("share/ur_description"));
        assert!(share.is_absolute());
    }

    #[test]
    fn test_ament_index_unregistered_package() {
        let prefix = TempDir::new().unwrap();
        // A share directory without the index marker is not registered
        fs::create_dir_all(prefix.path().join("share/stray_pkg")).unwrap();

        let index = AmentIndex::new(vec![prefix.path().to_path_buf()]);
        assert_eq!(
            index.share_directory("stray_pkg"),
            Err(SubstitutionError::PackageNotFound("stray_pkg".to_string()))
        );
    }

    #[test]
    fn test_ament_index_first_prefix_wins() {
        let overlay = TempDir::new().unwrap();
        let underlay = TempDir::new().unwrap();
        register(overlay.path(), "ur_moveit_config");
        register(underlay.path(), "ur_moveit_config");

        let index = AmentIndex::new(vec![
            overlay.path().to_path_buf(),
            underlay.path().to_path_buf(),
        ]);
        assert_eq!(
            index.share_directory("ur_moveit_config").unwrap(),
            overlay.path().join("share/ur_moveit_config")
        );
    }

    #[test]
    fn test_ament_index_ignores_relative_prefix() {
        let index = AmentIndex::new(vec![PathBuf::from("relative/install")]);
        assert!(index.share_directory("anything").is_err());
    }

    #[test]
    fn test_empty_package_name() {
        let index = AmentIndex::new(vec![]);
        assert_eq!(
            index.share_directory(""),
            Err(SubstitutionError::PackageNotFound(String::new()))
        );
    }

    #[test]
    fn test_share_path_join() {
        let index = StaticPackageIndex::new().with_package("ur_description", "/opt/ros/humble/share/ur_description");
        let path = index
            .share_path("ur_description", &["urdf", "ur.urdf.xacro"])
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/opt/ros/humble/share/ur_description/urdf/ur.urdf.xacro")
        );
    }

    #[test]
    fn test_static_index_repeated_lookup_is_stable() {
        let index = StaticPackageIndex::new().with_prefix(Path::new("/opt/ros/humble"), &["ur_description"]);
        let first = index.share_directory("ur_description").unwrap();
        let second = index.share_directory("ur_description").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_of_share() {
        let share = Path::new("/opt/ros/humble/share/hello_moveit_smk");
        assert_eq!(prefix_of_share(share), Some(Path::new("/opt/ros/humble")));
    }
}
