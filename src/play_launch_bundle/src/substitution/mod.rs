//! Substitution module

pub mod command;
pub mod expression;
pub mod shell;
pub mod types;

pub use command::{CommandErrorMode, DeferredCommand};
pub use expression::{ComposedExpression, ExpressionComposer, SubstitutionValue};
pub use shell::{quote_value, split_arguments};
pub use types::Fragment;
