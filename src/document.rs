//! Parsed documents: the root table plus per-node source metadata.
//!
//! A [`Document`] owns the value tree built by the assembler and, on the
//! side, the source region of every statement and (when requested) the
//! comments attached to it. Metadata is keyed by node path, so the value
//! types stay plain and comparable.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{Document, PathSegment};
//!
//! let doc = Document::parse("[server]\nport = 8080\n").unwrap();
//! assert_eq!(doc.get("server.port").and_then(|v| v.as_integer()), Some(8080));
//!
//! let path = [PathSegment::from("server"), PathSegment::from("port")];
//! assert_eq!(doc.region(&path).map(|r| r.line), Some(2));
//! ```

use crate::assemble;
use crate::error::{Error, Result};
use crate::location::Region;
use crate::options::{FormatOptions, ParseOptions};
use crate::value::{ArrayKind, Table, TableKind, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One step of a node path: a table key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Comments attached to one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comments {
    /// Full comment lines directly above the node's statement, without `#`.
    pub leading: Vec<String>,
    /// Comment at the end of the node's line, without `#`.
    pub trailing: Option<String>,
}

impl Comments {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_none()
    }
}

pub(crate) type RegionMap = HashMap<Vec<PathSegment>, Region>;
pub(crate) type CommentMap = HashMap<Vec<PathSegment>, Comments>;

/// A parsed document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    root: Table,
    regions: RegionMap,
    comments: CommentMap,
    source_name: Option<Arc<str>>,
}

impl Document {
    pub(crate) fn from_parts(
        root: Table,
        regions: RegionMap,
        comments: CommentMap,
        source_name: Option<Arc<str>>,
    ) -> Self {
        Document {
            root,
            regions,
            comments,
            source_name,
        }
    }

    /// Parses a document with default options.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or semantic error in the input.
    pub fn parse(src: &str) -> Result<Self> {
        Self::parse_with_options(src, &ParseOptions::default())
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or semantic error in the input, labelled with
    /// the configured source name.
    pub fn parse_with_options(src: &str, options: &ParseOptions) -> Result<Self> {
        assemble::assemble(src, options)
    }

    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Mutable access to the tree. Recorded regions and comments stay keyed
    /// by path and are not updated.
    pub fn root_mut(&mut self) -> &mut Table {
        &mut self.root
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        self.root
    }

    /// Looks up a value by a path written as a dotted key, e.g. `a."b.c".d`.
    ///
    /// Returns `None` if the path is not a valid key or nothing is there.
    /// Arrays of tables resolve to their last element, as headers do.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = self.resolve(path)?;
        self.get_path(&segments)
    }

    /// Looks up a value by explicit path segments.
    #[must_use]
    pub fn get_path(&self, path: &[PathSegment]) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// Region of the statement that defined `path`, or of its nearest
    /// recorded ancestor.
    #[must_use]
    pub fn region(&self, path: &[PathSegment]) -> Option<&Region> {
        (0..=path.len())
            .rev()
            .find_map(|len| self.regions.get(&path[..len]))
    }

    /// Comments attached to exactly `path`.
    #[must_use]
    pub fn comments(&self, path: &[PathSegment]) -> Option<&Comments> {
        self.comments.get(path)
    }

    pub(crate) fn comment_map(&self) -> &CommentMap {
        &self.comments
    }

    /// Reports whether the node at a dotted-key path is closed to further
    /// definitions.
    ///
    /// Scalars, static arrays and inline tables (with everything below them)
    /// are closed. Tables created by headers or dotted keys and arrays of
    /// tables stay open. Returns `None` if nothing is at `path`.
    ///
    /// ```rust
    /// use serde_tomlet::Document;
    ///
    /// let doc = Document::parse("point = { x = 1 }\n[[rows]]\n").unwrap();
    /// assert_eq!(doc.is_closed("point"), Some(true));
    /// assert_eq!(doc.is_closed("point.x"), Some(true));
    /// assert_eq!(doc.is_closed("rows"), Some(false));
    /// assert_eq!(doc.is_closed("missing"), None);
    /// ```
    #[must_use]
    pub fn is_closed(&self, path: &str) -> Option<bool> {
        let segments = self.resolve(path)?;
        let (first, rest) = segments.split_first()?;
        let PathSegment::Key(key) = first else {
            return None;
        };
        let mut value = self.root.get(key.as_str())?;
        let mut closed = closes(value);
        for segment in rest {
            value = match segment {
                PathSegment::Key(key) => value.as_table()?.get(key.as_str())?,
                PathSegment::Index(index) => value.as_array()?.get(*index)?,
            };
            closed |= closes(value);
        }
        Some(closed)
    }

    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Converts the value at `path` with `TryFrom<&Value>`.
    ///
    /// A type mismatch carries the region of the defining statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if nothing is at `path`, or the conversion
    /// error otherwise.
    ///
    /// ```rust
    /// use serde_tomlet::Document;
    ///
    /// let doc = Document::parse("name = \"tomlet\"\n").unwrap();
    /// let name: &str = doc.get_as("name").unwrap();
    /// assert_eq!(name, "tomlet");
    ///
    /// let err = doc.get_as::<i64>("name").unwrap_err();
    /// assert_eq!(err.region().map(|r| r.line), Some(1));
    /// ```
    pub fn get_as<'a, T>(&'a self, path: &str) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
    {
        let segments = self
            .resolve(path)
            .ok_or_else(|| Error::custom(format!("`{}` is not a valid key path", path)))?;
        let value = self
            .get_path(&segments)
            .ok_or_else(|| Error::custom(format!("no value at `{}`", path)))?;
        T::try_from(value).map_err(|err| err.or_region(self.region(&segments)))
    }

    /// Renders the document, including preserved comments unless disabled.
    #[must_use]
    pub fn to_string_with_options(&self, options: &FormatOptions) -> String {
        crate::format::format_document(self, options)
    }

    /// Turns a dotted key into concrete segments, stepping into the last
    /// element of every array of tables on the way.
    fn resolve(&self, path: &str) -> Option<Vec<PathSegment>> {
        let (keys, end) = crate::parse::key(path, 0);
        let keys = keys.ok()?;
        if end != path.len() {
            return None;
        }
        let mut segments = Vec::with_capacity(keys.len());
        let mut current = Some(&self.root);
        let last = keys.len() - 1;
        for (i, key) in keys.into_iter().enumerate() {
            let value = current.and_then(|table| table.get(key.as_str()));
            segments.push(PathSegment::Key(key));
            current = match value {
                Some(Value::Array(array)) if array.kind() == ArrayKind::OfTables && i < last => {
                    let index = array.len().checked_sub(1)?;
                    segments.push(PathSegment::Index(index));
                    array.last().and_then(Value::as_table)
                }
                Some(Value::Table(table)) => Some(table),
                _ => None,
            };
        }
        Some(segments)
    }
}

fn closes(value: &Value) -> bool {
    match value {
        Value::Table(table) => table.kind() == TableKind::Inline,
        Value::Array(array) => array.kind() == ArrayKind::Static,
        _ => true,
    }
}

/// Follows `path` from `root`.
pub(crate) fn lookup<'t>(root: &'t Table, path: &[PathSegment]) -> Option<&'t Value> {
    let (first, rest) = path.split_first()?;
    let PathSegment::Key(key) = first else {
        return None;
    };
    let mut value = root.get(key.as_str())?;
    for segment in rest {
        value = match segment {
            PathSegment::Key(key) => value.as_table()?.get(key.as_str())?,
            PathSegment::Index(index) => value.as_array()?.get(*index)?,
        };
    }
    Some(value)
}

/// Mutable counterpart of [`lookup`] that must end at a table.
pub(crate) fn lookup_table_mut<'t>(root: &'t mut Table, path: &[PathSegment]) -> Option<&'t mut Table> {
    let mut table = root;
    let mut rest = path;
    while let Some((segment, tail)) = rest.split_first() {
        let PathSegment::Key(key) = segment else {
            return None;
        };
        let mut value = table.get_mut(key.as_str())?;
        rest = tail;
        if let Some((PathSegment::Index(index), tail)) = rest.split_first() {
            value = value.as_array_mut()?.get_mut(*index)?;
            rest = tail;
        }
        table = value.as_table_mut()?;
    }
    Some(table)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_options(&FormatOptions::default()))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Document {
            root,
            ..Document::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CommentPolicy;

    fn path(parts: &[&str]) -> Vec<PathSegment> {
        parts.iter().map(|p| PathSegment::from(*p)).collect()
    }

    #[test]
    fn test_get_through_arrays_of_tables() {
        let doc = Document::parse("[[fruit]]\nname = 'apple'\n[[fruit]]\nname = 'pear'\n").unwrap();
        assert_eq!(doc.get("fruit.name").and_then(Value::as_str), Some("pear"));
        let first = [
            PathSegment::from("fruit"),
            PathSegment::from(0),
            PathSegment::from("name"),
        ];
        assert_eq!(doc.get_path(&first).and_then(Value::as_str), Some("apple"));
        assert_eq!(doc.region(&first).map(|r| r.line), Some(2));
    }

    #[test]
    fn test_get_rejects_bad_paths() {
        let doc = Document::parse("a = 1\n").unwrap();
        assert!(doc.get("a.").is_none());
        assert!(doc.get("a b").is_none());
        assert!(doc.get("b").is_none());
    }

    #[test]
    fn test_region_falls_back_to_ancestor() {
        let doc = Document::parse("\n\npoint = { x = 1, y = 2 }\n").unwrap();
        let region = doc.region(&path(&["point", "y"])).unwrap();
        assert_eq!((region.line, region.column), (3, 1));
        assert!(doc.region(&path(&[])).is_none());
    }

    #[test]
    fn test_is_closed() {
        let doc = Document::parse("a.b = 1\nlist = [1]\n[t]\n[[rows]]\nx = 1\n").unwrap();
        assert_eq!(doc.is_closed("a"), Some(false));
        assert_eq!(doc.is_closed("a.b"), Some(true));
        assert_eq!(doc.is_closed("list"), Some(true));
        assert_eq!(doc.is_closed("t"), Some(false));
        assert_eq!(doc.is_closed("rows"), Some(false));
        assert_eq!(doc.is_closed("rows.x"), Some(true));
        assert_eq!(doc.is_closed("a.b.c"), None);
    }

    #[test]
    fn test_comments_attach_to_nodes() {
        let options = ParseOptions::new().with_comments(CommentPolicy::Preserve);
        let src = "# header\n[server] # main\n# port\nport = 1 # tcp\n";
        let doc = Document::parse_with_options(src, &options).unwrap();

        let server = doc.comments(&path(&["server"])).unwrap();
        assert_eq!(server.leading, vec![" header".to_string()]);
        assert_eq!(server.trailing.as_deref(), Some(" main"));

        let port = doc.comments(&path(&["server", "port"])).unwrap();
        assert_eq!(port.leading, vec![" port".to_string()]);
        assert_eq!(port.trailing.as_deref(), Some(" tcp"));
    }

    #[test]
    fn test_comments_discarded_by_default() {
        let doc = Document::parse("# note\na = 1 # x\n").unwrap();
        assert!(doc.comments(&path(&["a"])).is_none());
    }

    #[test]
    fn test_source_name() {
        let options = ParseOptions::new().with_source_name("app.toml");
        let doc = Document::parse_with_options("a = 1", &options).unwrap();
        assert_eq!(doc.source_name(), Some("app.toml"));
        assert_eq!(
            doc.region(&path(&["a"])).and_then(|r| r.source_name.as_deref()),
            Some("app.toml")
        );
    }

    #[test]
    fn test_get_as_reports_region() {
        let doc = Document::parse("[db]\nport = \"x\"\n").unwrap();
        let err = doc.get_as::<i64>("db.port").unwrap_err();
        match err {
            Error::TypeMismatch { region, .. } => assert_eq!(region.map(|r| r.line), Some(2)),
            other => panic!("expected a type mismatch, got {:?}", other),
        }
        assert!(matches!(doc.get_as::<i64>("db.host"), Err(Error::Custom(_))));
    }
}
