//! Header parsing: builds a [`Relation`] from the lines before `@DATA`.
//!
//! Each non-blank header line is scanned into fields and dispatched on its first
//! field, compared case-insensitively:
//!
//! | Keyword | Effect |
//! |---------|--------|
//! | `@RELATION <name>` | sets the relation name |
//! | `@ATTRIBUTE <name> <type>` | appends an attribute |
//! | `@DATA` | ends the header |
//!
//! Anything else is [`Error::BadSyntax`]. A header without `@RELATION` is
//! accepted and leaves the relation name empty.

use crate::quoting::unquote;
use crate::scanner::LineScanner;
use crate::{DataType, Error, Relation, Result};
use std::io::BufRead;

/// Position of the parser within the header block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    ExpectRelation,
    ExpectAttributeOrData,
    Done,
}

/// Incremental header parser, fed one scanned line at a time.
///
/// # Examples
///
/// ```rust
/// use serde_arff::header::{HeaderParser, HeaderState};
///
/// let mut parser = HeaderParser::new();
/// parser.feed(&["@relation", "weather"]).unwrap();
/// parser.feed(&["@attribute", "outlook", "NOMINAL", "sunny", "rainy"]).unwrap();
/// assert_eq!(parser.feed(&["@data"]).unwrap(), HeaderState::Done);
///
/// let relation = parser.finish();
/// assert_eq!(relation.name, "weather");
/// assert_eq!(relation.attributes[0].nominal_values, vec!["sunny", "rainy"]);
/// ```
#[derive(Debug)]
pub struct HeaderParser {
    relation: Relation,
    state: HeaderState,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    #[must_use]
    pub fn new() -> Self {
        HeaderParser {
            relation: Relation::default(),
            state: HeaderState::ExpectRelation,
        }
    }

    #[must_use]
    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Applies one scanned, non-empty header line.
    ///
    /// Errors carry line 0; [`parse_header`] stamps the input line on them.
    /// Feeding after `@DATA` is a no-op.
    pub fn feed<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<HeaderState> {
        if self.state == HeaderState::Done {
            return Ok(self.state);
        }
        let Some(keyword) = fields.first().map(AsRef::as_ref) else {
            return Ok(self.state);
        };

        match keyword.to_ascii_uppercase().as_str() {
            "@RELATION" => {
                let name = fields
                    .get(1)
                    .ok_or(Error::MissingRelationName { line: 0 })?;
                self.relation.name = unquote(name.as_ref());
                self.state = HeaderState::ExpectAttributeOrData;
            }
            "@ATTRIBUTE" => {
                let name = fields
                    .get(1)
                    .map(|f| unquote(f.as_ref()))
                    .ok_or(Error::MissingAttributeName { line: 0 })?;
                let keyword = match fields.get(2) {
                    Some(keyword) => keyword.as_ref(),
                    None => return Err(Error::MissingAttributeType { line: 0, name }),
                };
                let Some(data_type) = DataType::from_keyword(keyword) else {
                    return Err(Error::InvalidAttributeType {
                        line: 0,
                        name,
                        data_type: keyword.to_string(),
                    });
                };

                // DATE may carry a format argument; only the ISO layout is supported
                let nominal_values = if data_type == DataType::Nominal {
                    fields[3..].iter().map(|f| unquote(f.as_ref())).collect()
                } else {
                    Vec::new()
                };
                self.relation.add_attribute(name, data_type, nominal_values)?;
                self.state = HeaderState::ExpectAttributeOrData;
            }
            "@DATA" => self.state = HeaderState::Done,
            _ => {
                return Err(Error::BadSyntax {
                    line: 0,
                    keyword: keyword.to_string(),
                })
            }
        }
        Ok(self.state)
    }

    #[must_use]
    pub fn finish(self) -> Relation {
        self.relation
    }
}

/// Reads header lines up to and including `@DATA`.
///
/// Running out of input first fails with [`Error::UnexpectedEof`].
pub fn parse_header<R: BufRead>(scanner: &mut LineScanner<R>) -> Result<Relation> {
    let mut parser = HeaderParser::new();

    while parser.state() != HeaderState::Done {
        let fields = scanner
            .header_fields()?
            .ok_or(Error::UnexpectedEof {
                line: scanner.line(),
            })?;
        if fields.is_empty() {
            continue;
        }
        parser
            .feed(fields.as_slice())
            .map_err(|e| e.at_line(scanner.line()))?;
    }

    let relation = parser.finish();
    tracing::debug!(
        relation = %relation.name,
        attributes = relation.len(),
        lines = scanner.line(),
        "Parsed ARFF header"
    );
    Ok(relation)
}
