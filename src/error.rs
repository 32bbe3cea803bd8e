//! Error types for TOML parsing, assembly, access and conversion.
//!
//! This module provides error reporting with enough context to render a
//! single human-readable diagnostic for every failure.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: the input does not match the grammar at some position
//! - **Semantic Errors**: the document redefines a key or table
//! - **Type Mismatches**: an accessor asked for the wrong kind of value
//! - **Range Errors**: a literal or conversion does not fit its target type
//! - **Internal Errors**: an invariant of the engine itself was violated
//!
//! ## Error Context
//!
//! Syntax, semantic and most range errors include:
//! - The source label, line and column of the offending position
//! - An excerpt of the offending line with a caret marker
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{parse, Error};
//!
//! let result = parse("a = 1\na = 2\n");
//! assert!(matches!(result, Err(Error::Semantic { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use crate::location::{self, Region};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The input does not match the grammar.
    #[error("syntax error at {region}: expected {expected}, found {found}\n{excerpt}")]
    Syntax {
        expected: String,
        found: String,
        region: Region,
        excerpt: String,
    },

    /// The input is well formed but redefines a key or table.
    #[error("{msg} at {region}\n{excerpt}")]
    Semantic {
        msg: String,
        region: Region,
        excerpt: String,
    },

    /// A typed accessor was used on a value of another kind.
    #[error("type mismatch{}: expected {expected}, found {found}", at(.region))]
    TypeMismatch {
        expected: String,
        found: String,
        region: Option<Region>,
    },

    /// A literal or conversion is out of the representable range.
    #[error("out of range{}: {msg}{}", at(.region), excerpt_suffix(.excerpt))]
    Range {
        msg: String,
        region: Option<Region>,
        excerpt: String,
    },

    /// An engine invariant was violated. This indicates a bug, not bad input.
    #[error("internal error: {0}")]
    Internal(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A `None` outside of a struct field; TOML has no null.
    #[error("Unsupported type: TOML has no representation for a missing value")]
    UnsupportedNone,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn at(region: &Option<Region>) -> String {
    region
        .as_ref()
        .map(|r| format!(" at {}", r))
        .unwrap_or_default()
}

fn excerpt_suffix(excerpt: &str) -> String {
    if excerpt.is_empty() {
        String::new()
    } else {
        format!("\n{}", excerpt)
    }
}

impl Error {
    /// Creates a syntax error at byte offset `pos` of `src`.
    ///
    /// The found-token description and the excerpt are derived from the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::Error;
    ///
    /// let err = Error::syntax("a = ?", 4, "a value");
    /// assert!(err.to_string().contains("expected a value, found `?`"));
    /// ```
    pub fn syntax(src: &str, pos: usize, expected: &str) -> Self {
        let region = Region::locate(src, pos, 1);
        Error::Syntax {
            expected: expected.to_string(),
            found: location::describe(src, pos),
            excerpt: region.excerpt(src),
            region,
        }
    }

    /// Creates a semantic (redefinition) error at `region` of `src`.
    pub fn semantic(src: &str, region: Region, msg: &str) -> Self {
        Error::Semantic {
            msg: msg.to_string(),
            excerpt: region.excerpt(src),
            region,
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            region: None,
        }
    }

    /// Creates a range error located in `src`.
    pub fn range_at(src: &str, pos: usize, len: usize, msg: &str) -> Self {
        let region = Region::locate(src, pos, len);
        Error::Range {
            msg: msg.to_string(),
            excerpt: region.excerpt(src),
            region: Some(region),
        }
    }

    /// Creates a range error with no source position.
    pub fn range(msg: &str) -> Self {
        Error::Range {
            msg: msg.to_string(),
            region: None,
            excerpt: String::new(),
        }
    }

    /// Creates an internal error.
    pub fn internal(msg: &str) -> Self {
        Error::Internal(msg.to_string())
    }

    /// Creates an unsupported type error for types that cannot be represented in TOML.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the source region attached to this error, if any.
    #[must_use]
    pub fn region(&self) -> Option<&Region> {
        match self {
            Error::Syntax { region, .. } | Error::Semantic { region, .. } => Some(region),
            Error::TypeMismatch { region, .. } | Error::Range { region, .. } => region.as_ref(),
            _ => None,
        }
    }

    /// Labels the attached region with the input's source name.
    #[must_use]
    pub fn with_source_name(mut self, name: Option<Arc<str>>) -> Self {
        match &mut self {
            Error::Syntax { region, .. } | Error::Semantic { region, .. } => {
                region.source_name = name;
            }
            Error::TypeMismatch {
                region: Some(region),
                ..
            }
            | Error::Range {
                region: Some(region),
                ..
            } => region.source_name = name,
            _ => {}
        }
        self
    }

    /// Attaches `region` to a type mismatch that has none yet.
    #[must_use]
    pub(crate) fn or_region(mut self, fallback: Option<&Region>) -> Self {
        if let Error::TypeMismatch { region, .. } = &mut self {
            if region.is_none() {
                *region = fallback.cloned();
            }
        }
        self
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
