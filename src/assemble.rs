//! Document assembly: turns the statement stream into a nested tree.
//!
//! The assembler scans the input line by line. Each line is blank, a comment,
//! or one statement followed by an optional comment. Statements are decoded by
//! [`parse::statement`] and applied to the tree under these rules:
//!
//! - `[a.b]` may create or pass through tables made by headers or dotted keys,
//!   and may promote a table that was only implied by an earlier header. It
//!   fails on an inline table, a static array, a scalar, or a table already
//!   defined by its own header or by dotted keys.
//! - `[[a.b]]` appends a new table to the array of tables at `a.b`, creating
//!   it on first use. Intermediate arrays of tables resolve to their last
//!   element.
//! - `a.b = v` runs relative to the current table; `a` may be created or
//!   extended only if it came from dotted keys or was implied by a header.
//! - A key may be defined once per table.

use crate::accept;
use crate::document::{CommentMap, Comments, Document, PathSegment, RegionMap};
use crate::error::{Error, Result};
use crate::location::LineIndex;
use crate::options::{CommentPolicy, ParseOptions};
use crate::parse::{self, Statement};
use crate::scan::skip_ws;
use crate::map::TableOrder;
use crate::value::{Array, ArrayKind, Table, TableKind, Value};
use std::sync::Arc;

/// Parses and assembles `src`.
pub(crate) fn assemble(src: &str, options: &ParseOptions) -> Result<Document> {
    let source_name: Option<Arc<str>> = options.source_name.as_deref().map(Arc::from);
    log_debug!(
        "assembling {} ({} bytes)",
        source_name.as_deref().unwrap_or("<input>"),
        src.len()
    );
    let assembler = Assembler {
        src,
        lines: LineIndex::new(src),
        preserve_comments: options.comments == CommentPolicy::Preserve,
        source_name: source_name.clone(),
        root: Table::new(),
        current: Vec::new(),
        last: Vec::new(),
        regions: RegionMap::new(),
        comments: CommentMap::new(),
        pending: Vec::new(),
    };
    let mut doc = assembler
        .run()
        .map_err(|err| err.with_source_name(source_name))?;
    if options.table_order == TableOrder::Hashed {
        doc.root_mut().set_order_recursive(TableOrder::Hashed);
    }
    Ok(doc)
}

struct Assembler<'s> {
    src: &'s str,
    lines: LineIndex,
    preserve_comments: bool,
    source_name: Option<Arc<str>>,
    root: Table,
    /// Path of the table that key/value lines currently extend.
    current: Vec<PathSegment>,
    /// Path of the node defined by the most recent statement.
    last: Vec<PathSegment>,
    regions: RegionMap,
    comments: CommentMap,
    /// Comment lines waiting for the next statement.
    pending: Vec<String>,
}

impl<'s> Assembler<'s> {
    fn run(mut self) -> Result<Document> {
        let src = self.src;
        let bytes = src.as_bytes();
        let mut pos = if src.starts_with('\u{feff}') { 3 } else { 0 };
        let mut statements = 0usize;

        while pos < bytes.len() {
            let start = skip_ws(bytes, pos);
            if let Some(end) = accept::comment(bytes, start) {
                if self.preserve_comments {
                    self.pending.push(src[start + 1..end].to_string());
                }
                pos = self.line_break(end)?;
                continue;
            }
            if start == bytes.len() || matches!(bytes[start], b'\n' | b'\r') {
                pos = self.line_break(start)?;
                continue;
            }

            let (statement, end) = parse::statement(src, start);
            self.apply(statement?, start, end)?;
            statements += 1;

            let after = skip_ws(bytes, end);
            let line_end = match accept::comment(bytes, after) {
                Some(comment_end) => {
                    if self.preserve_comments {
                        let text = src[after + 1..comment_end].to_string();
                        self.comments.entry(self.last.clone()).or_default().trailing = Some(text);
                    }
                    comment_end
                }
                None => after,
            };
            pos = self.line_break(line_end)?;
        }

        if !self.pending.is_empty() {
            log_trace!("dropping {} comment lines after the last statement", self.pending.len());
        }
        log_debug!("assembled {} statements", statements);
        Ok(Document::from_parts(
            self.root,
            self.regions,
            self.comments,
            self.source_name,
        ))
    }

    /// Requires a newline or the end of input at `pos`.
    fn line_break(&self, pos: usize) -> Result<usize> {
        if pos == self.src.len() {
            return Ok(pos);
        }
        accept::newline(self.src.as_bytes(), pos)
            .ok_or_else(|| Error::syntax(self.src, pos, "a newline or end of input"))
    }

    fn apply(&mut self, statement: Statement, start: usize, end: usize) -> Result<()> {
        let src = self.src;
        let region = self
            .lines
            .region(src, start, end - start)
            .with_source_name(self.source_name.clone());
        let redefined = |msg: String| Error::semantic(src, region.clone(), &msg);

        let path = match statement {
            Statement::TableHeader { keys } => {
                log_debug!("table [{}]", keys.join("."));
                let path = open_table(&mut self.root, &keys).map_err(redefined)?;
                self.current = path.clone();
                path
            }
            Statement::ArrayTableHeader { keys } => {
                log_debug!("array table [[{}]]", keys.join("."));
                let path = append_table(&mut self.root, &keys).map_err(redefined)?;
                self.current = path.clone();
                path
            }
            Statement::KeyValue { keys, value } => {
                log_trace!("key {}", keys.join("."));
                let table = crate::document::lookup_table_mut(&mut self.root, &self.current)
                    .ok_or_else(|| Error::internal("current table is missing from the tree"))?;
                insert_dotted(table, &keys, value).map_err(redefined)?;
                let mut path = self.current.clone();
                path.extend(keys.into_iter().map(PathSegment::Key));
                path
            }
        };

        if !self.pending.is_empty() {
            let leading = std::mem::take(&mut self.pending);
            self.comments.insert(
                path.clone(),
                Comments {
                    leading,
                    trailing: None,
                },
            );
        }
        self.regions.insert(path.clone(), region);
        self.last = path;
        Ok(())
    }
}

fn display_path(keys: &[String]) -> String {
    keys.join(".")
}

/// Inserts `value` at the dotted path `keys` below `table`.
///
/// Intermediate tables are created as dotted tables. Existing intermediates
/// must be dotted or implied tables; the last key must be new.
pub(crate) fn insert_dotted(
    table: &mut Table,
    keys: &[String],
    value: Value,
) -> std::result::Result<(), String> {
    let (last, parents) = keys
        .split_last()
        .ok_or_else(|| "empty key".to_string())?;
    let mut current = table;
    for (i, key) in parents.iter().enumerate() {
        let name = display_path(&keys[..=i]);
        let entry = current.get_or_insert_with(key, || Value::Table(Table::with_kind(TableKind::Dotted)));
        check_dotted_parent(entry, &name)?;
        current = match entry {
            Value::Table(t) => t,
            other => return Err(not_a_table(&name, other)),
        };
    }
    if current.contains_key(last.as_str()) {
        return Err(format!("duplicate key `{}`", display_path(keys)));
    }
    current.insert(last.clone(), value);
    Ok(())
}

/// Fails unless `value` is a table that dotted keys may extend.
fn check_dotted_parent(value: &Value, name: &str) -> std::result::Result<(), String> {
    match value {
        Value::Table(t) => match t.kind() {
            TableKind::Dotted | TableKind::Implicit => Ok(()),
            TableKind::Inline => Err(format!("inline table `{}` cannot be extended", name)),
            TableKind::Header => Err(format!(
                "table `{}` was defined by a header and cannot be extended with dotted keys",
                name
            )),
        },
        other => Err(not_a_table(name, other)),
    }
}

fn not_a_table(name: &str, value: &Value) -> String {
    format!(
        "key `{}` holds {} and cannot be used as a table",
        name,
        article(value.type_name())
    )
}

/// Checks that a header may pass through `value`. Returns the index of the
/// element to step into when `value` is an array of tables.
fn header_step(value: &Value, name: &str) -> std::result::Result<Option<usize>, String> {
    match value {
        Value::Table(t) if t.kind() == TableKind::Inline => {
            Err(format!("inline table `{}` cannot be extended", name))
        }
        Value::Table(_) => Ok(None),
        Value::Array(array) if array.kind() == ArrayKind::OfTables => match array.last() {
            Some(Value::Table(_)) => Ok(Some(array.len() - 1)),
            Some(_) => Err(format!("array of tables `{}` holds a non-table", name)),
            None => Err(format!("array of tables `{}` is empty", name)),
        },
        Value::Array(_) => Err(format!("static array `{}` cannot be extended", name)),
        other => Err(not_a_table(name, other)),
    }
}

/// Walks the parents of a header path, creating implied tables.
fn descend<'t>(
    root: &'t mut Table,
    keys: &[String],
    path: &mut Vec<PathSegment>,
) -> std::result::Result<&'t mut Table, String> {
    let mut current = root;
    for (i, key) in keys.iter().enumerate() {
        let name = display_path(&keys[..=i]);
        path.push(PathSegment::Key(key.clone()));
        let entry = current.get_or_insert_with(key, || Value::Table(Table::with_kind(TableKind::Implicit)));
        if let Some(index) = header_step(entry, &name)? {
            path.push(PathSegment::Index(index));
        }
        current = match entry {
            Value::Table(t) => t,
            Value::Array(array) => match array.last_mut() {
                Some(Value::Table(t)) => t,
                _ => return Err(format!("array of tables `{}` holds a non-table", name)),
            },
            other => return Err(not_a_table(&name, other)),
        };
    }
    Ok(current)
}

/// Applies `[keys]` and returns the path of the opened table.
fn open_table(root: &mut Table, keys: &[String]) -> std::result::Result<Vec<PathSegment>, String> {
    let (last, parents) = keys
        .split_last()
        .ok_or_else(|| "empty table header".to_string())?;
    let mut path = Vec::with_capacity(keys.len());
    let parent = descend(root, parents, &mut path)?;
    let name = display_path(keys);
    match parent.get_mut(last.as_str()) {
        None => {
            parent.insert(last.clone(), Value::Table(Table::with_kind(TableKind::Header)));
        }
        Some(Value::Table(t)) => match t.kind() {
            TableKind::Implicit => t.set_kind(TableKind::Header),
            TableKind::Header => return Err(format!("table `{}` is defined more than once", name)),
            TableKind::Dotted => {
                return Err(format!("table `{}` was already defined by dotted keys", name))
            }
            TableKind::Inline => return Err(format!("inline table `{}` cannot be extended", name)),
        },
        Some(Value::Array(array)) if array.kind() == ArrayKind::OfTables => {
            return Err(format!("`{}` is an array of tables, not a table", name))
        }
        Some(other) => {
            return Err(format!(
                "key `{}` already holds {}",
                name,
                article(other.type_name())
            ))
        }
    }
    path.push(PathSegment::Key(last.clone()));
    Ok(path)
}

/// Applies `[[keys]]` and returns the path of the new element.
fn append_table(root: &mut Table, keys: &[String]) -> std::result::Result<Vec<PathSegment>, String> {
    let (last, parents) = keys
        .split_last()
        .ok_or_else(|| "empty table header".to_string())?;
    let mut path = Vec::with_capacity(keys.len() + 1);
    let parent = descend(root, parents, &mut path)?;
    let name = display_path(keys);
    let entry = parent.get_or_insert_with(last, || Value::Array(Array::of_tables()));
    let index = match entry {
        Value::Array(array) if array.kind() == ArrayKind::OfTables => {
            array.push(Value::Table(Table::with_kind(TableKind::Header)));
            array.len() - 1
        }
        Value::Array(_) => return Err(format!("static array `{}` cannot be extended", name)),
        Value::Table(_) => return Err(format!("`{}` is a table, not an array of tables", name)),
        other => {
            return Err(format!(
                "key `{}` already holds {}",
                name,
                article(other.type_name())
            ))
        }
    };
    path.push(PathSegment::Key(last.clone()));
    path.push(PathSegment::Index(index));
    Ok(path)
}

fn article(type_name: &str) -> String {
    let vowel = type_name.starts_with(['a', 'e', 'i', 'o', 'u']);
    format!("{} {}", if vowel { "an" } else { "a" }, type_name)
}
