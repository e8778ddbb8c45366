//! Key Pattern Module
//!
//! Typed invalidation requests and the matcher that resolves them against
//! the live key set.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::CacheError;

/// Upper bound on the compiled size of a glob matcher.
pub const PATTERN_SIZE_LIMIT: usize = 1 << 16;

// == Key Pattern ==
/// Selects a set of cache keys for bulk invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPattern {
    /// Exactly this key
    Exact(String),
    /// Every key starting with this prefix
    Prefix(String),
    /// `*` matches any substring (including the empty one); every other
    /// character is literal
    Glob(String),
}

impl KeyPattern {
    pub fn exact(key: impl Into<String>) -> Self {
        Self::Exact(key.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob(pattern.into())
    }

    // == Compile ==
    /// Builds a matcher for this pattern.
    ///
    /// A glob without `*` degrades to an exact match. Glob segments are
    /// escaped before compilation, so characters such as `.` or `+` in a
    /// slug only ever match themselves.
    pub fn compile(&self) -> Result<KeyMatcher, CacheError> {
        let inner = match self {
            Self::Exact(key) => Matcher::Exact(key.clone()),
            Self::Prefix(prefix) => Matcher::Prefix(prefix.clone()),
            Self::Glob(pattern) if !pattern.contains('*') => Matcher::Exact(pattern.clone()),
            Self::Glob(pattern) => Matcher::Regex(compile_glob(pattern)?),
        };
        Ok(KeyMatcher { inner })
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(key) => write!(f, "{key}"),
            Self::Prefix(prefix) => write!(f, "{prefix}…"),
            Self::Glob(pattern) => write!(f, "{pattern}"),
        }
    }
}

fn compile_glob(pattern: &str) -> Result<Regex, CacheError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    RegexBuilder::new(&format!("^{body}$"))
        .dot_matches_new_line(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|source| CacheError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

// == Key Matcher ==
/// A compiled [`KeyPattern`].
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    inner: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Prefix(String),
    Regex(Regex),
}

impl KeyMatcher {
    pub fn matches(&self, key: &str) -> bool {
        match &self.inner {
            Matcher::Exact(expected) => key == expected,
            Matcher::Prefix(prefix) => key.starts_with(prefix.as_str()),
            Matcher::Regex(regex) => regex.is_match(key),
        }
    }
}

// == Invalidation Request ==
/// Either a single key or a pattern to purge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationRequest {
    Key(String),
    Pattern(KeyPattern),
}

impl fmt::Display for InvalidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

impl From<KeyPattern> for InvalidationRequest {
    fn from(pattern: KeyPattern) -> Self {
        Self::Pattern(pattern)
    }
}
