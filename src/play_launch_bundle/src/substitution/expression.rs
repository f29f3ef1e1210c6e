//! Composed command expressions
//!
//! An [`ExpressionComposer`] turns a template path and ordered `key:=value`
//! substitutions into a [`ComposedExpression`]: a flat fragment sequence of
//! the form
//!
//! ```text
//! $(find-exec xacro) <template> key1:=value1 key2:=value2 ...
//! ```
//!
//! Nothing is executed or looked up while composing.

use crate::{
    error::{GenerationError, SubstitutionError},
    substitution::{
        shell::{escape_quoted, needs_quoting, quote_value, EMPTY_QUOTED},
        types::Fragment,
    },
};
use serde::Serialize;
use std::{fmt, path::PathBuf};

const SEPARATOR: &str = " ";
const ASSIGN: &str = ":=";

/// Ordered, immutable fragment sequence forming one unevaluated invocation
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComposedExpression {
    fragments: Vec<Fragment>,
}

impl ComposedExpression {
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Render with every fragment resolved to concrete text.
    ///
    /// `find_executable` is consulted for each executable lookup token. The
    /// resolved path is quoted so it stays one argv word.
    pub fn resolve<F>(&self, mut find_executable: F) -> Result<String, GenerationError>
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        let mut result = String::new();
        let mut quoted = false;
        for fragment in &self.fragments {
            match fragment {
                Fragment::FindExecutable(name) => {
                    let path = find_executable(name)
                        .ok_or_else(|| GenerationError::ExecutableNotFound(name.clone()))?;
                    let text = path.display().to_string();
                    if quoted {
                        result.push_str(&escape_quoted(&text));
                    } else {
                        result.push_str(&quote_value(&text));
                    }
                }
                Fragment::Quote => {
                    quoted = !quoted;
                    result.push('"');
                }
                other => result.push_str(&other.to_string()),
            }
        }
        Ok(result)
    }
}

impl fmt::Display for ComposedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

/// Right-hand side of a `key:=value` substitution
#[derive(Debug, Clone, PartialEq)]
pub enum SubstitutionValue {
    Text(String),
    Path(PathBuf),
    Expression(ComposedExpression),
}

impl From<&str> for SubstitutionValue {
    fn from(s: &str) -> Self {
        SubstitutionValue::Text(s.to_string())
    }
}

impl From<String> for SubstitutionValue {
    fn from(s: String) -> Self {
        SubstitutionValue::Text(s)
    }
}

impl From<PathBuf> for SubstitutionValue {
    fn from(p: PathBuf) -> Self {
        SubstitutionValue::Path(p)
    }
}

impl From<ComposedExpression> for SubstitutionValue {
    fn from(expr: ComposedExpression) -> Self {
        SubstitutionValue::Expression(expr)
    }
}

impl SubstitutionValue {
    fn push_fragments(&self, out: &mut Vec<Fragment>) {
        match self {
            SubstitutionValue::Text(s) => out.push(Fragment::Text(quote_value(s))),
            SubstitutionValue::Path(p) => {
                let text = p.display().to_string();
                if quote_value(&text) == text {
                    out.push(Fragment::Path(p.clone()));
                } else {
                    // Paths with whitespace travel as one quoted token
                    out.push(Fragment::Text(quote_value(&text)));
                }
            }
            SubstitutionValue::Expression(expr) => push_nested(expr, out),
        }
    }
}

/// Inline a nested expression, grouping it into one quoted word when any
/// literal piece would otherwise split.
fn push_nested(expr: &ComposedExpression, out: &mut Vec<Fragment>) {
    if expr.is_empty() {
        out.push(Fragment::text(EMPTY_QUOTED));
        return;
    }

    let mut inner_quoted = false;
    let mut needs_group = false;
    for fragment in expr.fragments() {
        match fragment {
            Fragment::Quote => inner_quoted = !inner_quoted,
            Fragment::Text(s) if !inner_quoted => needs_group |= needs_quoting(s),
            Fragment::Path(p) if !inner_quoted => {
                needs_group |= needs_quoting(&p.display().to_string())
            }
            _ => {}
        }
    }
    if !needs_group {
        out.extend(expr.fragments().iter().cloned());
        return;
    }

    // Inner groups are absorbed by the outer one; their text is already escaped
    out.push(Fragment::Quote);
    let mut inner_quoted = false;
    for fragment in expr.fragments() {
        match fragment {
            Fragment::Quote => inner_quoted = !inner_quoted,
            Fragment::Text(s) if !inner_quoted => out.push(Fragment::Text(escape_quoted(s))),
            Fragment::Path(p) if !inner_quoted => {
                let text = p.display().to_string();
                let escaped = escape_quoted(&text);
                if escaped == text {
                    out.push(fragment.clone());
                } else {
                    out.push(Fragment::Text(escaped));
                }
            }
            other => out.push(other.clone()),
        }
    }
    out.push(Fragment::Quote);
}

/// Builder for a templating-tool invocation
#[derive(Debug, Clone)]
pub struct ExpressionComposer {
    executable: String,
    template: Fragment,
    substitutions: Vec<(String, SubstitutionValue)>,
}

impl ExpressionComposer {
    pub fn new(executable: impl Into<String>, template: Fragment) -> Self {
        Self {
            executable: executable.into(),
            template,
            substitutions: Vec::new(),
        }
    }

    /// Invocation of `xacro` on `template`
    pub fn xacro(template: impl Into<PathBuf>) -> Self {
        Self::new("xacro", Fragment::Path(template.into()))
    }

    /// Append a `key:=value` substitution. Keys are unique and keep caller order.
    pub fn arg(
        &mut self,
        key: &str,
        value: impl Into<SubstitutionValue>,
    ) -> Result<&mut Self, SubstitutionError> {
        validate_key(key)?;
        if self.substitutions.iter().any(|(k, _)| k == key) {
            return Err(SubstitutionError::DuplicateSubstitutionKey(key.to_string()));
        }
        self.substitutions.push((key.to_string(), value.into()));
        Ok(self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.substitutions.iter().map(|(k, _)| k.as_str())
    }

    pub fn compose(&self) -> ComposedExpression {
        let mut fragments = vec![
            Fragment::FindExecutable(self.executable.clone()),
            Fragment::text(SEPARATOR),
        ];
        match &self.template {
            Fragment::Path(p) => SubstitutionValue::Path(p.clone()).push_fragments(&mut fragments),
            Fragment::Text(s) => SubstitutionValue::Text(s.clone()).push_fragments(&mut fragments),
            other => fragments.push(other.clone()),
        }
        fragments.push(Fragment::text(SEPARATOR));

        for (key, value) in &self.substitutions {
            fragments.push(Fragment::Text(format!("{}{}", key, ASSIGN)));
            value.push_fragments(&mut fragments);
            fragments.push(Fragment::text(SEPARATOR));
        }

        log::debug!(
            "Composed {} invocation with {} substitutions",
            self.executable,
            self.substitutions.len()
        );
        ComposedExpression::from_fragments(fragments)
    }
}

fn validate_key(key: &str) -> Result<(), SubstitutionError> {
    let malformed = key.is_empty()
        || key.contains(ASSIGN)
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'));
    if malformed {
        Err(SubstitutionError::InvalidSubstitutionKey(key.to_string()))
    } else {
        Ok(())
    }
}
