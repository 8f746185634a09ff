//! Single-quote escaping for names, nominal values and strings.
//!
//! ARFF leaves tokens bare unless they contain characters that would confuse the
//! scanner. Quoted tokens use `'...'` with backslash escapes:
//!
//! ```text
//! \\  - backslash
//! \'  - single quote
//! \a \b \f \n \r \t \v - control characters
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::quoting::{quote, unquote};
//!
//! assert_eq!(quote("plain"), "plain");
//! assert_eq!(quote("with space"), "'with space'");
//! assert_eq!(quote("?"), "'?'");
//! assert_eq!(unquote(r"'with \'quoted\''"), "with 'quoted'");
//! ```

const QUOTE: char = '\'';

/// Returns `true` if `s` must be wrapped in quotes to survive a round trip.
///
/// The empty string never needs quoting; the bare `?` always does, since it is
/// reserved as the missing-value marker.
#[inline]
#[must_use]
pub fn needs_quotes(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if s == "?" {
        return true;
    }
    s.chars().any(|ch| {
        matches!(
            ch,
            ' ' | '"'
                | '\''
                | '%'
                | '{'
                | '}'
                | '\u{0007}'
                | '\u{0008}'
                | '\u{000C}'
                | '\n'
                | '\r'
                | '\t'
                | '\u{000B}'
        )
    })
}

/// Trims `raw` and quotes it if needed.
///
/// # Examples
///
/// ```rust
/// use serde_arff::quoting::quote;
///
/// assert_eq!(quote(" with whitespace"), "'with whitespace'");
/// assert_eq!(quote("line\r\nbreak"), r"'line\r\nbreak'");
/// assert_eq!(quote("日本"), "日本");
/// ```
#[must_use]
pub fn quote(raw: &str) -> String {
    let s = raw.trim();
    if !needs_quotes(s) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + s.len() / 2 + 2);
    out.push(QUOTE);
    for ch in s.chars() {
        match ch {
            QUOTE => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\u{0007}' => out.push_str("\\a"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000B}' => out.push_str("\\v"),
            _ => out.push(ch),
        }
    }
    out.push(QUOTE);
    out
}

/// Trims `token` and, if it is wrapped in single quotes, strips them and resolves
/// escapes.
///
/// Tokens that are not quoted on both ends come back trimmed but otherwise
/// untouched. Unknown escapes are kept literally (backslash included). A
/// backslash right before the closing quote escapes it, yielding a `'`.
///
/// # Examples
///
/// ```rust
/// use serde_arff::quoting::unquote;
///
/// assert_eq!(unquote("'one quote"), "'one quote");
/// assert_eq!(unquote(r"'back\\'"), r"back\");
/// assert_eq!(unquote(r"'\x'"), r"\x");
/// ```
#[must_use]
pub fn unquote(token: &str) -> String {
    let s = token.trim();
    let inner = match s
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
    {
        Some(inner) if s.len() >= 2 => inner,
        _ => return s.to_string(),
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(QUOTE) => out.push(QUOTE),
            Some('\\') => out.push('\\'),
            Some('a') => out.push('\u{0007}'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{000B}'),
            Some(other) => {
                // Unknown escape - preserve literally (lenient parsing)
                out.push('\\');
                out.push(other);
            }
            // a trailing backslash escapes the closing quote
            None => out.push(QUOTE),
        }
    }
    out.trim().to_string()
}
