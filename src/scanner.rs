//! Line scanning for header and data sections.
//!
//! Both sections share one quote-aware state machine. The header flavour splits on
//! runs of blanks and expands `{...}` spans into a synthetic `NOMINAL` field
//! followed by the comma-separated values inside the braces; the data flavour splits
//! on commas. In both, `%` outside quotes starts a comment running to the end of
//! the line.
//!
//! Quoted spans are emitted verbatim, delimiters and escapes included. Callers
//! resolve them with [`unquote`](crate::quoting::unquote) once they know what the
//! field means.
//!
//! A quote toggles the quote state unless the character right before it is a
//! backslash. Escape parity is not tracked, so a quoted value ending in an escaped
//! backslash (`'back\\'`) does not close where a full escape parser would.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::scanner::{scan_data_line, scan_header_line};
//!
//! assert_eq!(
//!     scan_header_line("@attribute 'play time' {yes,no} % comment"),
//!     vec!["@attribute", "'play time'", "NOMINAL", "yes", "no"],
//! );
//! assert_eq!(
//!     scan_data_line("sunny, 85 ,'a, b',{2}"),
//!     vec!["sunny", "85", "'a, b'", "{2}"],
//! );
//! ```

use crate::Result;
use std::io::BufRead;

/// Marker emitted in place of a `{...}` span in header lines.
pub const NOMINAL_MARKER: &str = "NOMINAL";

const QUOTE: char = '\'';

#[inline]
fn push_field(fields: &mut Vec<String>, raw: &str) {
    let field = raw.trim();
    if !field.is_empty() {
        fields.push(field.to_string());
    }
}

/// Splits one data line into raw fields.
///
/// Blank and comment-only lines yield no fields. Empty fields between two commas
/// are dropped.
#[must_use]
pub fn scan_data_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut end = line.len();
    let mut in_quote = false;
    let mut prev = '\0';

    for (i, ch) in line.char_indices() {
        match ch {
            QUOTE => {
                if !in_quote {
                    in_quote = true;
                } else if prev != '\\' {
                    in_quote = false;
                    push_field(&mut fields, &line[start..i + ch.len_utf8()]);
                    start = i + ch.len_utf8();
                }
            }
            ',' if !in_quote => {
                push_field(&mut fields, &line[start..i]);
                start = i + ch.len_utf8();
            }
            '%' if !in_quote => {
                end = i;
                break;
            }
            _ => {}
        }
        prev = ch;
    }

    if start < end {
        push_field(&mut fields, &line[start..end]);
    }
    fields
}

/// Splits one header line into raw fields.
///
/// A `{a,b,c}` span becomes `NOMINAL`, `a`, `b`, `c`. Brackets do not nest: the
/// first `}` outside quotes closes the span.
#[must_use]
pub fn scan_header_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut end = line.len();
    let mut in_quote = false;
    let mut in_bracket = false;
    let mut prev = '\0';

    for (i, ch) in line.char_indices() {
        let next = i + ch.len_utf8();
        match ch {
            QUOTE => {
                if !in_quote {
                    in_quote = true;
                } else if prev != '\\' {
                    in_quote = false;
                    if !in_bracket {
                        push_field(&mut fields, &line[start..next]);
                        start = next;
                    }
                }
            }
            '{' if !in_quote && !in_bracket => {
                push_field(&mut fields, &line[start..i]);
                in_bracket = true;
                start = next;
            }
            '}' if !in_quote && in_bracket => {
                in_bracket = false;
                fields.push(NOMINAL_MARKER.to_string());
                fields.extend(scan_data_line(&line[start..i]));
                start = next;
            }
            ' ' | '\t' if !in_quote && !in_bracket => {
                push_field(&mut fields, &line[start..i]);
                start = next;
            }
            '%' if !in_quote && !in_bracket => {
                end = i;
                break;
            }
            _ => {}
        }
        prev = ch;
    }

    if start < end {
        push_field(&mut fields, &line[start..end]);
    }
    fields
}

/// Pulls lines from a buffered source and scans them, counting lines as it goes.
///
/// The counter is 1-based and advances on every read attempt, including blank
/// lines, comment lines and the attempt that hits the end of the stream.
pub struct LineScanner<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        LineScanner {
            reader,
            line: 0,
            buf: String::with_capacity(256),
        }
    }

    /// Number of the line read last (0 before the first read).
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_line(&mut self) -> Result<Option<&str>> {
        self.line += 1;
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }

        let text = self.buf.as_str();
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(Some(text))
    }

    /// Scans the next header line. `None` means the stream has ended.
    ///
    /// Blank and comment-only lines come back as an empty field list.
    pub fn header_fields(&mut self) -> Result<Option<Vec<String>>> {
        Ok(self.next_line()?.map(scan_header_line))
    }

    /// Scans data lines until one yields fields. `None` means the stream has ended.
    pub fn data_fields(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) => {
                    let fields = scan_data_line(line);
                    if !fields.is_empty() {
                        return Ok(Some(fields));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_header_fields() {
        let mut scanner = LineScanner::new("@keyword value\n".as_bytes());
        let fields = scanner.header_fields().unwrap().unwrap();
        assert_eq!(scanner.line(), 1);
        assert_eq!(fields, vec!["@keyword", "value"]);
    }

    #[test]
    fn test_complex_header_fields() {
        let line = " \t @keyword \t 'quoted\\' string ' {with,simple, words,'plus something',  '{really} tri\\'cky'  } ";
        assert_eq!(
            scan_header_line(line),
            vec![
                "@keyword",
                "'quoted\\' string '",
                "NOMINAL",
                "with",
                "simple",
                "words",
                "'plus something'",
                "'{really} tri\\'cky'",
            ]
        );
    }

    #[test]
    fn test_header_comments() {
        assert_eq!(
            scan_header_line("@keyword value % comment starts here "),
            vec!["@keyword", "value"]
        );
        assert!(scan_header_line("% just a comment").is_empty());
        assert!(scan_header_line(" \t ").is_empty());
    }

    #[test]
    fn test_header_percent_inside_quotes_and_brackets() {
        assert_eq!(
            scan_header_line("@attribute '50% off' {'a%b',c}"),
            vec!["@attribute", "'50% off'", "NOMINAL", "'a%b'", "c"]
        );
    }

    #[test]
    fn test_header_empty_and_adjacent_brackets() {
        assert_eq!(
            scan_header_line("@attribute 'z' {}"),
            vec!["@attribute", "'z'", "NOMINAL"]
        );
        assert_eq!(
            scan_header_line("@attribute z{a,b}"),
            vec!["@attribute", "z", "NOMINAL", "a", "b"]
        );
    }

    #[test]
    fn test_header_brackets_do_not_nest() {
        assert_eq!(
            scan_header_line("@attribute x {a{b}c"),
            vec!["@attribute", "x", "NOMINAL", "a{b", "c"]
        );
    }

    #[test]
    fn test_data_row_fields() {
        let mut scanner = LineScanner::new("str,0.51, 'quoted\\' string', {5}\n".as_bytes());
        let fields = scanner.data_fields().unwrap().unwrap();
        assert_eq!(scanner.line(), 1);
        assert_eq!(fields, vec!["str", "0.51", "'quoted\\' string'", "{5}"]);
    }

    #[test]
    fn test_data_whitespace_and_comments() {
        assert_eq!(
            scan_data_line("  a , b b ,c % trailing, comment"),
            vec!["a", "b b", "c"]
        );
        assert_eq!(scan_data_line("'x % y',z"), vec!["'x % y'", "z"]);
        assert!(scan_data_line("% only a comment").is_empty());
        assert!(scan_data_line("   ").is_empty());
        assert!(scan_data_line("").is_empty());
    }

    #[test]
    fn test_data_empty_fields_are_dropped() {
        assert_eq!(scan_data_line("a,,b,"), vec!["a", "b"]);
    }

    #[test]
    fn test_data_unicode() {
        assert_eq!(
            scan_data_line("日本,'東 京',ü"),
            vec!["日本", "'東 京'", "ü"]
        );
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote_keeps_span_open() {
        // the quote after `\\` is read as escaped, so the span runs to the end
        assert_eq!(scan_data_line(r"'back\\',x"), vec![r"'back\\',x"]);
        assert_eq!(
            scan_header_line(r"@relation 'back\\' x"),
            vec!["@relation", r"'back\\' x"]
        );
    }

    #[test]
    fn test_data_fields_skip_blank_lines_and_count_them() {
        let input = "\n% comment\n   \na,b\n";
        let mut scanner = LineScanner::new(input.as_bytes());
        let fields = scanner.data_fields().unwrap().unwrap();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(scanner.line(), 4);

        assert!(scanner.data_fields().unwrap().is_none());
        assert_eq!(scanner.line(), 5);
    }

    #[test]
    fn test_crlf_and_missing_final_terminator() {
        let mut scanner = LineScanner::new("a,b\r\nc,d".as_bytes());
        assert_eq!(scanner.data_fields().unwrap().unwrap(), vec!["a", "b"]);
        assert_eq!(scanner.data_fields().unwrap().unwrap(), vec!["c", "d"]);
        assert!(scanner.data_fields().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = &[b'a', 0xFF, b'\n'];
        let mut scanner = LineScanner::new(bytes);
        assert!(matches!(scanner.data_fields(), Err(crate::Error::Io(_))));
    }
}
