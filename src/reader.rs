//! Row-by-row ARFF reading.
//!
//! A [`Reader`] parses the header as soon as it is created, then hands out one
//! [`DataRow`] per call to [`Reader::read_row`]. Blank and comment lines between
//! rows are skipped. The reader is also an [`Iterator`] over `Result<DataRow>`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{Reader, Value};
//!
//! let input = "\
//! @relation weather
//! @attribute outlook {sunny,overcast,rainy}
//! @attribute temperature numeric
//! @data
//! sunny,85
//! % a comment
//! overcast,?,{2.5}
//! ";
//!
//! let mut reader = Reader::new(input.as_bytes()).unwrap();
//! assert_eq!(reader.relation().name, "weather");
//!
//! let first = reader.read_row().unwrap().unwrap();
//! assert_eq!(first.values, vec![Value::from("sunny"), Value::Number(85.0)]);
//!
//! let second = reader.read_row().unwrap().unwrap();
//! assert_eq!(second.values[1], Value::Missing);
//! assert_eq!(second.weight, 2.5);
//!
//! assert!(reader.read_row().unwrap().is_none());
//! ```
//!
//! ## Failure
//!
//! Errors are terminal. Once a row fails to parse, every further call to
//! [`Reader::read_row`] returns the same error, and the iterator ends after
//! yielding it once.

use crate::de::from_record;
use crate::header::parse_header;
use crate::record::Record;
use crate::scanner::LineScanner;
use crate::{DataRow, Error, ReaderOptions, Relation, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

/// Pull-based ARFF reader over any buffered byte source.
pub struct Reader<R> {
    relation: Relation,
    scanner: LineScanner<R>,
    options: ReaderOptions,
    failed: Option<Error>,
    finished: bool,
    rows: usize,
}

impl Reader<BufReader<File>> {
    /// Opens the file at `path` and parses its header.
    ///
    /// The reader owns the file; it is closed by [`Reader::close`] or on drop.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Opened ARFF file");
        Self::with_options(BufReader::new(file), options)
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader and parses the header block.
    ///
    /// # Errors
    ///
    /// Returns any header error ([`Error::BadSyntax`], [`Error::UnexpectedEof`],
    /// ...) with the line it occurred on.
    pub fn new(src: R) -> Result<Self> {
        Self::with_options(src, ReaderOptions::default())
    }

    pub fn with_options(src: R, options: ReaderOptions) -> Result<Self> {
        let mut scanner = LineScanner::new(src);
        let relation = parse_header(&mut scanner)?;
        Ok(Reader {
            relation,
            scanner,
            options,
            failed: None,
            finished: false,
            rows: 0,
        })
    }

    /// The schema parsed from the header.
    #[inline]
    #[must_use]
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Number of the input line read last.
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.scanner.line()
    }

    /// Reads the next data row. `Ok(None)` marks the end of the data section.
    pub fn read_row(&mut self) -> Result<Option<DataRow>> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if self.finished {
            return Ok(None);
        }

        match self.parse_row() {
            Ok(Some(row)) => {
                self.rows += 1;
                tracing::trace!(
                    line = self.scanner.line(),
                    values = row.len(),
                    weight = row.weight,
                    "Read ARFF row"
                );
                Ok(Some(row))
            }
            Ok(None) => {
                self.finished = true;
                tracing::debug!(
                    relation = %self.relation.name,
                    rows = self.rows,
                    "Reached end of ARFF data"
                );
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(
                    relation = %self.relation.name,
                    error = %err,
                    "Failed to read ARFF row"
                );
                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }

    fn parse_row(&mut self) -> Result<Option<DataRow>> {
        let Some(tokens) = self.scanner.data_fields()? else {
            return Ok(None);
        };
        let line = self.scanner.line();
        let expected = self.relation.len();
        if tokens.len() < expected || tokens.len() > expected + 1 {
            return Err(Error::AttributeMismatch {
                line,
                expected,
                found: tokens.len(),
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (attr, token) in self.relation.attributes.iter().zip(&tokens) {
            let value = attr.parse_value(token).map_err(|e| e.at_line(line))?;
            if self.options.strict_nominal && !attr.accepts(&value) {
                return Err(Error::NotNominal {
                    line,
                    token: token.clone(),
                    attribute: attr.name.clone(),
                });
            }
            values.push(value);
        }

        let weight = match tokens.get(expected) {
            Some(token) => parse_weight(token).ok_or_else(|| Error::InvalidWeight {
                line,
                token: token.clone(),
            })?,
            None => 0.0,
        };

        Ok(Some(DataRow { values, weight }))
    }

    /// Reads every remaining row.
    ///
    /// # Errors
    ///
    /// Fails with the first row error; rows read before it are discarded.
    pub fn read_all(&mut self) -> Result<Vec<DataRow>> {
        let mut rows = Vec::new();
        while let Some(row) = self.read_row()? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Iterates over the remaining rows as attribute-name keyed [`Record`]s.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    /// Iterates over the remaining rows, deserializing each into `T`.
    ///
    /// Structs are matched by attribute name, tuples and sequences by position.
    /// Missing values deserialize as `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use serde_arff::Reader;
    ///
    /// #[derive(Deserialize, Debug, PartialEq)]
    /// struct Weather {
    ///     outlook: String,
    ///     temperature: Option<f64>,
    /// }
    ///
    /// let input = "@relation w\n@attribute outlook string\n@attribute temperature real\n@data\nsunny,85\nrainy,?\n";
    /// let mut reader = Reader::new(input.as_bytes()).unwrap();
    /// let rows: Vec<Weather> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(rows[1], Weather { outlook: "rainy".to_string(), temperature: None });
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&mut self) -> DeserializeRecords<'_, R, T> {
        DeserializeRecords {
            reader: self,
            _marker: PhantomData,
        }
    }

    /// Releases the reader and its source.
    ///
    /// Files opened through [`Reader::open`] are closed; caller-supplied sources
    /// are simply dropped (pass `&mut source` to keep using it).
    pub fn close(self) -> Result<()> {
        tracing::debug!(rows = self.rows, "Closed ARFF reader");
        Ok(())
    }

    /// Returns the underlying source, positioned after the last line read.
    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }
}

/// Parses a `{<number>}` weight token; the number must be non-negative.
fn parse_weight(token: &str) -> Option<f64> {
    let inner = token.strip_prefix('{')?.strip_suffix('}')?;
    let weight = inner.trim().parse::<f64>().ok()?;
    (weight >= 0.0).then_some(weight)
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = Result<DataRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed.is_some() {
            return None;
        }
        self.read_row().transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for Reader<R> {}

/// Iterator returned by [`Reader::records`].
pub struct Records<'r, R> {
    reader: &'r mut Reader<R>,
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.reader.next()?;
        Some(row.map(|row| Record::from_row(self.reader.relation(), row)))
    }
}

/// Iterator returned by [`Reader::deserialize`].
pub struct DeserializeRecords<'r, R, T> {
    reader: &'r mut Reader<R>,
    _marker: PhantomData<T>,
}

impl<R: BufRead, T: DeserializeOwned> Iterator for DeserializeRecords<'_, R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.reader.next()? {
            Ok(row) => row,
            Err(err) => return Some(Err(err)),
        };
        let line = self.reader.line();
        Some(
            from_record(Record::from_row(self.reader.relation(), row))
                .map_err(|e| Error::custom(format!("line {}: {}", line, e))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use std::io::Cursor;

    const WEATHER_HEAD: &str = "@relation weather\n\
        @attribute outlook {sunny,overcast,rainy}\n\
        @attribute temperature real\n\
        @data\n";

    fn reader(data: &str) -> Reader<Cursor<String>> {
        Reader::new(Cursor::new(format!("{}{}", WEATHER_HEAD, data))).unwrap()
    }

    #[test]
    fn test_missing_numeric_is_not_an_error() {
        let mut r = reader("sunny,?\n");
        let row = r.read_row().unwrap().unwrap();
        assert_eq!(row.values, vec![Value::from("sunny"), Value::Missing]);
    }

    #[test]
    fn test_weights() {
        let mut r = reader("sunny,85,{4.0}\n");
        assert_eq!(r.read_row().unwrap().unwrap().weight, 4.0);

        let mut r = reader("sunny,85,{-1}\n");
        assert_eq!(
            r.read_row().unwrap_err(),
            Error::InvalidWeight {
                line: 5,
                token: "{-1}".to_string()
            }
        );

        let mut r = reader("sunny,85,4\n");
        assert!(matches!(r.read_row(), Err(Error::InvalidWeight { .. })));

        let mut r = reader("sunny,85,{4},{5}\n");
        assert_eq!(
            r.read_row().unwrap_err(),
            Error::AttributeMismatch {
                line: 5,
                expected: 2,
                found: 4
            }
        );
    }

    #[test]
    fn test_too_few_values() {
        let mut r = reader("sunny,85\nsunny\n");
        r.read_row().unwrap();
        assert_eq!(
            r.read_row().unwrap_err(),
            Error::AttributeMismatch {
                line: 6,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_value_errors_carry_line() {
        let mut r = reader("\n\nsunny,hot\n");
        assert_eq!(
            r.read_row().unwrap_err(),
            Error::NotNumeric {
                line: 7,
                token: "hot".to_string()
            }
        );
    }

    #[test]
    fn test_comment_and_blank_lines_skipped() {
        let mut r = reader("% just a comment\n   \nrainy,70\n");
        let row = r.read_row().unwrap().unwrap();
        assert_eq!(row.values[0], Value::from("rainy"));
        assert_eq!(r.line(), 7);
        assert!(r.read_row().unwrap().is_none());
    }

    #[test]
    fn test_errors_are_terminal() {
        let mut r = reader("sunny,hot\nrainy,70\n");
        let first = r.read_row().unwrap_err();
        assert_eq!(r.read_row().unwrap_err(), first);
        assert_eq!(r.read_row().unwrap_err(), first);
    }

    #[test]
    fn test_iterator_yields_error_once() {
        let r = reader("sunny,85\nsunny,hot\nrainy,70\n");
        let items: Vec<_> = r.collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_read_all_fails_on_bad_row() {
        let mut r = reader("sunny,85\nboo\nrainy,70\n");
        assert!(matches!(
            r.read_all(),
            Err(Error::AttributeMismatch { line: 6, .. })
        ));
    }

    #[test]
    fn test_strict_nominal() {
        let input = format!("{}cloudy,70\n", WEATHER_HEAD);
        let mut permissive = Reader::new(input.as_bytes()).unwrap();
        assert_eq!(
            permissive.read_row().unwrap().unwrap().values[0],
            Value::from("cloudy")
        );

        let options = ReaderOptions::new().with_strict_nominal(true);
        let mut strict = Reader::with_options(input.as_bytes(), options).unwrap();
        assert_eq!(
            strict.read_row().unwrap_err(),
            Error::NotNominal {
                line: 5,
                token: "cloudy".to_string(),
                attribute: "outlook".to_string()
            }
        );
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("{5}"), Some(5.0));
        assert_eq!(parse_weight("{0}"), Some(0.0));
        assert_eq!(parse_weight("{2.2}"), Some(2.2));
        assert_eq!(parse_weight("{-0.1}"), None);
        assert_eq!(parse_weight("{NaN}"), None);
        assert_eq!(parse_weight("{}"), None);
        assert_eq!(parse_weight("5"), None);
        assert_eq!(parse_weight("{5"), None);
    }
}
