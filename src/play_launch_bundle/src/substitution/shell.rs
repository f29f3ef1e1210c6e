//! Shell-style quoting and argument splitting
//!
//! Command text is split the way POSIX `sh` would split it: whitespace
//! separates words, double quotes group with `\"` and `\\` escapes, single
//! quotes group literally.

use crate::error::GenerationError;

/// Token for a value explicitly set to the empty string
pub const EMPTY_QUOTED: &str = "\"\"";

/// Check if outer quotes truly wrap the entire token
/// Returns true only if the opening quote's matching closing quote is at the end
pub(crate) fn is_fully_quoted(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    let quote = bytes[0];
    if (quote != b'"' && quote != b'\'') || bytes[bytes.len() - 1] != quote {
        return false;
    }

    let mut escaped = false;
    for (pos, &b) in bytes.iter().enumerate().skip(1) {
        if quote == b'"' && !escaped && b == b'\\' {
            escaped = true;
            continue;
        }
        if b == quote && !escaped {
            return pos == bytes.len() - 1;
        }
        escaped = false;
    }
    false
}

pub(crate) fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'))
}

/// Quote a substitution value so it survives argument splitting as one word.
///
/// The empty string becomes `""`; already-quoted tokens pass through.
pub fn quote_value(value: &str) -> String {
    if value.is_empty() {
        return EMPTY_QUOTED.to_string();
    }
    if is_fully_quoted(value) || !needs_quoting(value) {
        return value.to_string();
    }

    format!("\"{}\"", escape_quoted(value))
}

/// Escape `"` and `\` for use between double quotes.
pub(crate) fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Split command text into argv words.
pub fn split_arguments(command: &str) -> Result<Vec<String>, GenerationError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = command.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(unterminated(command, '\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\' | '$' | '`')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(unterminated(command, '"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(unterminated(command, '"')),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(c) = chars.next() {
                    current.push(c);
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated(command: &str, quote: char) -> GenerationError {
    GenerationError::CommandFailed(format!(
        "Unterminated {} quote in command: {}",
        quote, command
    ))
}
