//! ARFF Format Reference
//!
//! This module documents the Attribute-Relation File Format as read and written
//! by this library.
//!
//! # Overview
//!
//! An ARFF file is a line-oriented text file made of two sections. The header
//! declares the relation name and an ordered list of typed attributes; the data
//! section holds one row per line, one value per attribute.
//!
//! ```text
//! % the weather data set
//! @RELATION weather
//!
//! @ATTRIBUTE outlook {sunny,overcast,rainy}
//! @ATTRIBUTE temperature NUMERIC
//! @ATTRIBUTE observed DATE
//! @ATTRIBUTE note STRING
//!
//! @DATA
//! sunny,85,2014-10-24T09:03:34,'hot and dry'
//! rainy,?,?,?,{2.5}
//! ```
//!
//! # Header
//!
//! | Line | Meaning |
//! |------|---------|
//! | `@RELATION <name>` | names the relation |
//! | `@ATTRIBUTE <name> <type>` | appends an attribute |
//! | `@DATA` | ends the header |
//!
//! Keywords are case-insensitive. Names are bare words or single-quoted strings.
//! A header without `@RELATION` is read with an empty relation name; writing one
//! is an error.
//!
//! ## Attribute types
//!
//! | Keyword | Type | Notes |
//! |---------|------|-------|
//! | `NUMERIC`, `REAL`, `INTEGER` | numeric | parsed as `f64` |
//! | `STRING` | string | |
//! | `DATE` | date | a trailing format argument is ignored |
//! | `{v1,v2,...}` | nominal | `{}` declares an empty value set |
//!
//! Attribute names must be unique within a relation.
//!
//! # Data
//!
//! Values are separated by commas and trimmed. A row may carry one extra field,
//! `{<weight>}`, holding a non-negative number; rows without it are unweighted
//! and are written without it.
//!
//! | Value | Syntax | Example |
//! |-------|--------|---------|
//! | Missing | `?` | `?` |
//! | Number | decimal, optional exponent when read | `-0.6`, `1e3` |
//! | Date | `YYYY-MM-DDTHH:MM:SS`, UTC | `2014-10-24T09:03:34` |
//! | Text | bare or single-quoted | `green`, `'light blue'` |
//!
//! Numbers are written in plain decimal with trailing fractional zeros removed.
//! Empty fields (`a,,b`) are skipped.
//!
//! # Quoting
//!
//! Text is wrapped in single quotes when it contains a space, a quote of either
//! kind, `%`, a brace, or a control character, and when it is exactly `?`. Inside
//! quotes the following escapes apply:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\\` | backslash |
//! | `\'` | single quote |
//! | `\a` `\b` `\f` `\v` | BEL, BS, FF, VT |
//! | `\n` `\r` `\t` | LF, CR, TAB |
//!
//! Unknown escapes are kept as written. A comma alone does not trigger quoting,
//! so text values containing commas do not survive a round trip unquoted.
//!
//! # Comments and blank lines
//!
//! `%` starts a comment that runs to the end of the line, unless it appears inside
//! quotes or a nominal value list. Blank and comment-only lines may appear
//! anywhere and are skipped; they still count toward reported line numbers.
//!
//! # Line endings
//!
//! Both `\n` and `\r\n` are accepted when reading, and a final line without a
//! terminator is still read. Writers emit `\n` unless configured with
//! [`Terminator::CrLf`](crate::Terminator::CrLf).
//!
//! # Not supported
//!
//! - Sparse rows (`{0 x, 3 y}`)
//! - `RELATIONAL` attributes
//! - Date format patterns other than the fixed layout above
