//! Fragment types

use serde::Serialize;
use std::{fmt, path::PathBuf};

/// One atomic piece of a composed command line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fragment {
    /// Literal text, emitted as-is
    Text(String),
    /// Filesystem path already resolved at composition time
    Path(PathBuf),
    /// $(find-exec name) - executable looked up on PATH at launch time
    FindExecutable(String),
    /// Double quote opening or closing one grouped word
    Quote,
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text(s.into())
    }

    pub fn path(p: impl Into<PathBuf>) -> Self {
        Fragment::Path(p.into())
    }

    pub fn find_executable(name: impl Into<String>) -> Self {
        Fragment::FindExecutable(name.into())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(s) => f.write_str(s),
            Fragment::Path(p) => write!(f, "{}", p.display()),
            Fragment::FindExecutable(name) => write!(f, "$(find-exec {})", name),
            Fragment::Quote => f.write_str("\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_display() {
        assert_eq!(Fragment::text("name:=ur").to_string(), "name:=ur");
    }

    #[test]
    fn test_find_executable_display() {
        assert_eq!(
            Fragment::find_executable("xacro").to_string(),
            "$(find-exec xacro)"
        );
    }

    #[test]
    fn test_quote_display() {
        assert_eq!(Fragment::Quote.to_string(), "\"");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Fragment::find_executable("xacro")).unwrap();
        assert_eq!(json, r#"{"kind":"find_executable","value":"xacro"}"#);
        let json = serde_json::to_string(&Fragment::Quote).unwrap();
        assert_eq!(json, r#"{"kind":"quote"}"#);
    }
}
