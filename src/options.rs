//! Configuration options for parsing and formatting.
//!
//! This module provides types to customize how documents are read and written:
//!
//! - [`ParseOptions`]: comment policy, table backing and a diagnostic label
//! - [`FormatOptions`]: line width, float precision, comment output, inlining
//! - [`CommentPolicy`]: discard or preserve comments while parsing
//! - [`TableOrder`]: insertion-ordered or hash-based table backing
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{parse_with_options, CommentPolicy, FormatOptions, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .with_comments(CommentPolicy::Preserve)
//!     .with_source_name("app.toml");
//! let doc = parse_with_options("# port to bind\nport = 8080\n", &options).unwrap();
//!
//! let text = doc.to_string_with_options(&FormatOptions::new());
//! assert_eq!(text, "# port to bind\nport = 8080\n");
//! ```

pub use crate::map::TableOrder;

/// What the parser does with `#` comments.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::CommentPolicy;
///
/// assert_eq!(CommentPolicy::default(), CommentPolicy::Discard);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// Comments are recognized and dropped.
    #[default]
    Discard,
    /// Each node keeps the comment lines directly above it and the comment
    /// trailing its line.
    Preserve,
}

/// Options controlling [`Document::parse_with_options`](crate::Document::parse_with_options).
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::{ParseOptions, TableOrder};
///
/// let options = ParseOptions::new().with_table_order(TableOrder::Hashed);
/// assert_eq!(options.table_order, TableOrder::Hashed);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub comments: CommentPolicy,
    pub table_order: TableOrder,
    pub source_name: Option<String>,
}

impl ParseOptions {
    /// Creates default options (discard comments, insertion order, no label).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comment policy.
    #[must_use]
    pub fn with_comments(mut self, comments: CommentPolicy) -> Self {
        self.comments = comments;
        self
    }

    /// Sets the backing used for every table in the parsed tree.
    #[must_use]
    pub fn with_table_order(mut self, order: TableOrder) -> Self {
        self.table_order = order;
        self
    }

    /// Sets the label used in diagnostics, usually a file name.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// Options controlling text output.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::FormatOptions;
///
/// // Default: 80 columns, shortest float form, comments on
/// let options = FormatOptions::new();
/// assert_eq!(options.width, 80);
///
/// // Custom configuration
/// let options = FormatOptions::new()
///     .with_width(40)
///     .with_float_precision(3)
///     .without_comments()
///     .with_force_inline(true);
/// assert!(!options.comments);
/// ```
#[derive(Clone, Debug)]
pub struct FormatOptions {
    pub width: usize,
    pub float_precision: Option<usize>,
    pub comments: bool,
    pub force_inline: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            width: 80,
            float_precision: None,
            comments: true,
            force_inline: false,
        }
    }
}

impl FormatOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width past which a `key = [...]` line is broken per element.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Prints floats with a fixed number of fractional digits.
    #[must_use]
    pub fn with_float_precision(mut self, digits: usize) -> Self {
        self.float_precision = Some(digits);
        self
    }

    /// Suppresses preserved comments in the output.
    #[must_use]
    pub fn without_comments(mut self) -> Self {
        self.comments = false;
        self
    }

    /// Emits every table below the root as an inline table.
    #[must_use]
    pub fn with_force_inline(mut self, force_inline: bool) -> Self {
        self.force_inline = force_inline;
        self
    }
}
