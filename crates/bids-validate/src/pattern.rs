//! Shell-style file name patterns.
//!
//! A pattern is matched against the trailing components of a path relative to
//! the search directory, so `*_T1w.nii.gz` matches at any depth and
//! `anat/*_T1w.nii.gz` only matches files whose parent directory is `anat`.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use regex::Regex;

use crate::error::{Result, ValidateError};

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
    components: usize,
}

impl FilePattern {
    /// Compile a glob pattern.
    ///
    /// Supported syntax: `*` (any run within one component), `?` (one
    /// character), `[abc]`, `[a-z]` and `[!abc]` classes. Everything else is
    /// literal.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidPattern`] for an empty pattern, an empty
    /// path component, a `**` wildcard, or a malformed character class.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| ValidateError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = pattern.trim_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(invalid("pattern contains an empty path component"));
        }
        if trimmed.contains("**") {
            return Err(invalid(
                "'**' is not supported; patterns already match at any depth",
            ));
        }

        let mut source = String::with_capacity(trimmed.len() * 2 + 2);
        source.push('^');
        let mut chars = trimmed.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => source.push_str("[^/]*"),
                '?' => source.push_str("[^/]"),
                '[' => push_class(&mut chars, &mut source).map_err(invalid)?,
                _ => {
                    let mut buf = [0u8; 4];
                    source.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                }
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            regex,
            components: trimmed.split('/').count(),
        })
    }

    /// Returns true if the trailing components of `relative` match.
    #[must_use]
    pub fn matches(&self, relative: &Path) -> bool {
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        if parts.len() < self.components {
            return false;
        }
        let tail = parts[parts.len() - self.components..].join("/");
        self.regex.is_match(&tail)
    }
}

/// Translate a `[...]` class; the opening bracket is already consumed.
fn push_class(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> std::result::Result<(), &'static str> {
    let negated = matches!(chars.peek(), Some('!' | '^'));
    if negated {
        chars.next();
    }

    let mut members = Vec::new();
    let mut closed = false;
    for c in chars.by_ref() {
        // A leading ']' is a literal member.
        if c == ']' && !members.is_empty() {
            closed = true;
            break;
        }
        if c == '/' {
            return Err("character class cannot contain '/'");
        }
        members.push(c);
    }
    if !closed {
        return Err("unterminated character class");
    }

    out.push_str(if negated { "[^/" } else { "[" });
    let last = members.len() - 1;
    for (i, c) in members.iter().enumerate() {
        match c {
            '-' if i != 0 && i != last => out.push('-'),
            '\\' | '[' | ']' | '^' | '-' | '&' | '~' => {
                out.push('\\');
                out.push(*c);
            }
            _ => out.push(*c),
        }
    }
    out.push(']');
    Ok(())
}
