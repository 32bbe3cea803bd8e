//! String values that remember how they were quoted.
//!
//! A [`TomlString`] is a growable text buffer plus a [`StringStyle`]. The style
//! is a serialization hint: parsing `'C:\path'` yields a literal-styled string
//! that is written back with single quotes, while `"C:\\path"` yields a basic
//! one. Style never takes part in equality, ordering or hashing.
//!
//! `TomlString` dereferences to [`String`], so all the usual positional and
//! substring operations (indexing by range, `find`, `chars`, `push_str`, ...)
//! are available directly.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{StringStyle, TomlString};
//!
//! let mut s = TomlString::literal(r"C:\Users");
//! s.push_str(r"\nodejs");
//! assert_eq!(s.find("nodejs"), Some(9));
//! assert_eq!(s.style(), StringStyle::Literal);
//! assert_eq!(s, TomlString::from(r"C:\Users\nodejs"));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, RangeBounds};

/// Quoting family of a string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StringStyle {
    /// `"..."` or `"""..."""`: escape sequences are processed.
    #[default]
    Basic,
    /// `'...'` or `'''...'''`: content is taken verbatim.
    Literal,
}

/// Text of a string value plus its quoting style.
#[derive(Clone, Debug, Default)]
pub struct TomlString {
    text: String,
    style: StringStyle,
}

impl TomlString {
    /// Creates a basic-styled string.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_style(text, StringStyle::Basic)
    }

    /// Creates a literal-styled string.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::with_style(text, StringStyle::Literal)
    }

    #[must_use]
    pub fn with_style(text: impl Into<String>, style: StringStyle) -> Self {
        TomlString {
            text: text.into(),
            style,
        }
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> StringStyle {
        self.style
    }

    #[inline]
    pub fn set_style(&mut self, style: StringStyle) {
        self.style = style;
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the byte range `range` as a new string of the same style.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or splits a UTF-8 sequence, like
    /// slicing a `str`.
    ///
    /// ```rust
    /// use serde_tomlet::{StringStyle, TomlString};
    ///
    /// let s = TomlString::literal("hello world");
    /// let sub = s.substr(6..);
    /// assert_eq!(sub, "world");
    /// assert_eq!(sub.style(), StringStyle::Literal);
    /// ```
    #[must_use]
    pub fn substr<R: RangeBounds<usize>>(&self, range: R) -> TomlString {
        let start = match range.start_bound() {
            std::ops::Bound::Included(&s) => s,
            std::ops::Bound::Excluded(&s) => s + 1,
            std::ops::Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            std::ops::Bound::Included(&e) => e + 1,
            std::ops::Bound::Excluded(&e) => e,
            std::ops::Bound::Unbounded => self.text.len(),
        };
        TomlString::with_style(&self.text[start..end], self.style)
    }
}

impl Deref for TomlString {
    type Target = String;

    fn deref(&self) -> &String {
        &self.text
    }
}

impl DerefMut for TomlString {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl AsRef<str> for TomlString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Borrow<str> for TomlString {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl PartialEq for TomlString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TomlString {}

impl Hash for TomlString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for TomlString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TomlString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl PartialEq<str> for TomlString {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for TomlString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<String> for TomlString {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}

impl PartialEq<TomlString> for &str {
    fn eq(&self, other: &TomlString) -> bool {
        *self == other.text
    }
}

impl PartialEq<TomlString> for String {
    fn eq(&self, other: &TomlString) -> bool {
        *self == other.text
    }
}

impl std::ops::AddAssign<&str> for TomlString {
    fn add_assign(&mut self, rhs: &str) {
        self.text.push_str(rhs);
    }
}

impl std::ops::AddAssign<&TomlString> for TomlString {
    fn add_assign(&mut self, rhs: &TomlString) {
        self.text.push_str(&rhs.text);
    }
}

impl From<&str> for TomlString {
    fn from(value: &str) -> Self {
        TomlString::new(value)
    }
}

impl From<String> for TomlString {
    fn from(value: String) -> Self {
        TomlString::new(value)
    }
}

impl From<TomlString> for String {
    fn from(value: TomlString) -> Self {
        value.text
    }
}

/// Writes the raw text; use [`Value`](crate::Value)'s `Display` for the quoted form.
impl fmt::Display for TomlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
