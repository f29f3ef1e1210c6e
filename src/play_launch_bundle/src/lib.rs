//! play_launch_bundle library
//!
//! Assembles the deferred parameter bundle for a MoveIt demo node: robot
//! descriptions rendered by xacro at launch time, plus package-relative
//! configuration paths, handed to a single process declaration.

pub mod assembly;
pub mod bundle;
pub mod config;
pub mod error;
pub mod package;
pub mod params;
pub mod process;
pub mod record;
pub mod substitution;

pub use bundle::{ParameterBundle, ParameterBundleBuilder, ParameterValue, ScalarValue};
pub use config::AssemblyConfig;
pub use error::{AssemblyError, BundleError, GenerationError, Result, SubstitutionError};
pub use package::{AmentIndex, PackageIndex, StaticPackageIndex};
pub use process::{OutputMode, ProcessSpec};
pub use record::{ProcessRecord, RecordGenerator};
pub use substitution::{ComposedExpression, DeferredCommand, ExpressionComposer, Fragment};

/// Assemble the demo node's process declaration.
///
/// All package paths are resolved against `index`; any failure aborts the
/// whole assembly.
pub fn assemble_launch(index: &dyn PackageIndex, config: &AssemblyConfig) -> Result<ProcessSpec> {
    assembly::demo_node(index, config)
}
