//! Record module for resolving a process declaration at launch time

pub mod exec;
pub mod generator;
pub mod types;

pub use exec::{CommandOutput, CommandRunner, ExecutableLocator, PathLocator, SystemRunner};
pub use generator::RecordGenerator;
pub use types::ProcessRecord;
