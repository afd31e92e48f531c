//! Path expressions into message content
//!
//! This module defines the path syntax used to key matching rules and
//! generators in the `body` category:
//! - DocPath: Path into a content tree (e.g., `$.user.name` or `$.items[0]`)
//! - PathToken: Individual path component (Field, Index or a wildcard)
//!
//! # Path Syntax
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `$` | Root | `$` |
//! | `.key` | Object property | `$.user` |
//! | `['key']` | Quoted property | `$['first name']` |
//! | `[n]` | Array index | `$.items[0]` |
//! | `[*]` | Any array element | `$.items[*]` |
//! | `.*` | Any property | `$.*` |

use crate::error::{PactError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A token in a path expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathToken {
    /// Object key: `.foo` or `['foo bar']`
    Field(String),
    /// Array index: `[0]`
    Index(usize),
    /// Any property: `.*`
    Star,
    /// Any array element: `[*]`
    StarIndex,
}

impl PathToken {
    fn is_identifier(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Field(k) if PathToken::is_identifier(k) => write!(f, ".{}", k),
            PathToken::Field(k) => {
                write!(f, "['{}']", k.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            PathToken::Index(i) => write!(f, "[{}]", i),
            PathToken::Star => write!(f, ".*"),
            PathToken::StarIndex => write!(f, "[*]"),
        }
    }
}

/// A path into a message body
///
/// DocPath is always rooted at `$`. Paths are built while walking a content
/// tree and rendered to strings to key entries in the `body` rule and
/// generator categories.
///
/// # Examples
///
/// ```
/// use pactum_core::path::DocPath;
///
/// let path = DocPath::root().field("items").index(0).field("id");
/// assert_eq!(path.to_string(), "$.items[0].id");
///
/// let parsed: DocPath = "$.items[0].id".parse().unwrap();
/// assert_eq!(parsed, path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct DocPath {
    tokens: Vec<PathToken>,
}

impl DocPath {
    /// Create the root path (`$`)
    pub fn root() -> Self {
        DocPath { tokens: Vec::new() }
    }

    /// Append a field token (builder pattern)
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.tokens.push(PathToken::Field(name.into()));
        self
    }

    /// Append an index token (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.tokens.push(PathToken::Index(idx));
        self
    }

    /// Append a `[*]` token (builder pattern)
    pub fn star_index(mut self) -> Self {
        self.tokens.push(PathToken::StarIndex);
        self
    }

}

impl FromStr for DocPath {
    type Err = PactError;

    /// Parse a path expression
    ///
    /// The leading `$` is required; `$` alone is the root.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.first() != Some(&'$') {
            return Err(PactError::invalid_path(s, "path must start with '$'"));
        }

        let mut tokens = Vec::new();
        let mut i = 1;
        while i < chars.len() {
            match chars[i] {
                '.' => {
                    i += 1;
                    if i < chars.len() && chars[i] == '*' {
                        tokens.push(PathToken::Star);
                        i += 1;
                        continue;
                    }
                    let start = i;
                    while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                        i += 1;
                    }
                    let name: String = chars[start..i].iter().collect();
                    if name.is_empty() {
                        return Err(PactError::invalid_path(
                            s,
                            format!("empty field name at position {}", start),
                        ));
                    }
                    tokens.push(PathToken::Field(name));
                }
                '[' => {
                    let start = i;
                    i += 1;
                    if i < chars.len() && (chars[i] == '\'' || chars[i] == '"') {
                        let quote = chars[i];
                        i += 1;
                        let mut name = String::new();
                        while i < chars.len() && chars[i] != quote {
                            if chars[i] == '\\' && i + 1 < chars.len() {
                                i += 1;
                            }
                            name.push(chars[i]);
                            i += 1;
                        }
                        if i + 1 >= chars.len() || chars[i + 1] != ']' {
                            return Err(PactError::invalid_path(
                                s,
                                format!("unclosed bracket starting at position {}", start),
                            ));
                        }
                        tokens.push(PathToken::Field(name));
                        i += 2;
                    } else {
                        let idx_start = i;
                        while i < chars.len() && chars[i] != ']' {
                            i += 1;
                        }
                        if i >= chars.len() {
                            return Err(PactError::invalid_path(
                                s,
                                format!("unclosed bracket starting at position {}", start),
                            ));
                        }
                        let idx_str: String = chars[idx_start..i].iter().collect();
                        if idx_str == "*" {
                            tokens.push(PathToken::StarIndex);
                        } else {
                            let idx = idx_str.parse::<usize>().map_err(|_| {
                                PactError::invalid_path(
                                    s,
                                    format!("invalid array index '{}' at position {}", idx_str, idx_start),
                                )
                            })?;
                            tokens.push(PathToken::Index(idx));
                        }
                        i += 1;
                    }
                }
                c => {
                    return Err(PactError::invalid_path(
                        s,
                        format!("unexpected character '{}' at position {}", c, i),
                    ))
                }
            }
        }

        Ok(DocPath { tokens })
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
