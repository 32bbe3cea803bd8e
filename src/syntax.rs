//! Accepted Syntax
//!
//! This module documents the document syntax as implemented by this library.
//! It contains no code.
//!
//! # Overview
//!
//! A document is a sequence of lines. Each line holds at most one statement
//! (a key/value pair, a `[table]` header or an `[[array]]` header), optionally
//! followed by a comment. Input must be valid UTF-8; a leading byte-order mark
//! is skipped. Lines end with `\n` or `\r\n`.
//!
//! # Keys
//!
//! | Form | Example | Notes |
//! |------|---------|-------|
//! | Bare | `server_1`, `max-size` | `A-Z a-z 0-9 _ -` only, at least one char |
//! | Basic quoted | `"key with spaces"` | Escapes allowed, may be empty |
//! | Literal quoted | `'C:\path'` | No escapes |
//! | Dotted | `a."b.c".d` | Whitespace around `.` is allowed |
//!
//! Keys compare byte-exactly after unquoting, so `a`, `"a"` and `'a'` are the
//! same key.
//!
//! # Values
//!
//! ## Booleans
//!
//! `true` and `false`, lowercase only.
//!
//! ## Integers
//!
//! ```text
//! dec = +99        # sign allowed on decimals only
//! sep = 1_000      # `_` must sit between two digits
//! hex = 0xDEAD_beef
//! oct = 0o755
//! bin = 0b1101
//! ```
//!
//! Leading zeros are rejected (`07`), except for `0`, `+0` and `-0`. Values
//! outside the signed 64-bit range are a range error, not a syntax error.
//!
//! ## Floats
//!
//! ```text
//! pi  = 3.1415
//! exp = -2E-2
//! big = 6.626e34
//! sp  = [inf, +inf, -inf, nan, -nan]
//! ```
//!
//! Both sides of `.` need digits (`1.` and `.5` are rejected). A finite
//! literal that overflows to infinity is a range error.
//!
//! ## Strings
//!
//! | Form | Delimiters | Escapes | Newlines |
//! |------|------------|---------|----------|
//! | Basic | `"..."` | yes | no |
//! | Multi-line basic | `"""..."""` | yes, plus line continuation | yes |
//! | Literal | `'...'` | no | no |
//! | Multi-line literal | `'''...'''` | no | yes |
//!
//! Escapes: `\b \t \n \f \r \" \\ \uXXXX \UXXXXXXXX`. Unicode escapes must
//! name a scalar value (no surrogates). In multi-line strings a newline
//! directly after the opening delimiter is dropped, and a `\` at the end of a
//! line removes the newline and all whitespace (including further blank lines)
//! up to the next non-whitespace character. Up to two quote characters may
//! sit directly before the closing delimiter.
//!
//! Control characters other than tab are rejected in every form; multi-line
//! forms additionally allow newlines.
//!
//! ## Dates and Times
//!
//! ```text
//! ld  = 1979-05-27                      # local date
//! lt  = 07:32:00.999999                 # local time
//! ldt = 1979-05-27T07:32:00             # local date-time
//! odt = 1979-05-27 07:32:00-07:00       # offset date-time
//! utc = 1979-05-27T07:32:00z            # `Z` or `z`
//! ```
//!
//! The date/time separator is `T`, `t` or a single space. Days are checked
//! against the month and leap years; second 60 is allowed. Fractions keep
//! their digit count (up to nanoseconds); extra digits are truncated.
//!
//! ## Arrays
//!
//! ```text
//! ints   = [1, 2, 3]
//! mixed  = ["a", 1, { x = 2 }]
//! spread = [
//!     1,   # comments and newlines are allowed inside
//!     2,
//! ]
//! ```
//!
//! Elements may have different types. A trailing comma is allowed.
//!
//! ## Inline Tables
//!
//! ```text
//! point = { x = 1, y.z = 2 }
//! ```
//!
//! Inline tables must fit on one line and may not have a trailing comma.
//! Once the statement ends, the table is closed: neither headers nor dotted
//! keys can add to it.
//!
//! Arrays and inline tables nest at most 128 levels deep.
//!
//! # Tables
//!
//! ```text
//! [server]            # opens a table
//! host = "localhost"
//!
//! [server.tls]        # opens a sub-table, creating `server` if needed
//! enabled = true
//!
//! [[replica]]         # appends a table to the `replica` array
//! name = "a"
//!
//! [[replica]]
//! name = "b"
//! ```
//!
//! **Rules**:
//! - A key may be assigned only once per table
//! - A table may be opened by a header only once; a table created only as
//!   the parent of another header may still get its own header later
//! - A table created by dotted keys (`a.b = 1`) cannot be reopened by a
//!   header, and a header-defined table cannot be extended by dotted keys
//!   from another table
//! - `[[name]]` may only extend an array built by `[[name]]`; a `[ ... ]`
//!   array literal is closed
//! - Inside a header path, an array of tables stands for its last element
//!
//! # Comments
//!
//! `#` starts a comment that runs to the end of the line. Comments may not
//! contain control characters other than tab. They are dropped unless
//! [`CommentPolicy::Preserve`](crate::CommentPolicy::Preserve) is selected,
//! in which case full comment lines attach to the next statement and a
//! comment after a statement attaches to that statement.
//!
//! # Output
//!
//! The formatter writes plain `key = value` lines first, then sub-tables as
//! `[a.b]` sections and arrays of tables as `[[a.b]]` blocks. See
//! [`FormatOptions`](crate::FormatOptions) for the available knobs.
