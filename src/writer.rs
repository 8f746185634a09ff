//! Row-by-row ARFF writing.
//!
//! A [`Writer`] validates the relation, writes the header block as soon as it is
//! created, then appends one line per [`DataRow`]. Each row is assembled in an
//! internal buffer and handed to the sink in a single write, so a failed append
//! never leaves half a row behind.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{row, Attribute, Relation, Writer};
//!
//! let relation = Relation::new("colors")
//!     .with_attribute(Attribute::string("name"))
//!     .unwrap()
//!     .with_attribute(Attribute::numeric("hue"))
//!     .unwrap();
//!
//! let mut writer = Writer::new(Vec::new(), &relation).unwrap();
//! writer.append(&row!["light blue", 0.55]).unwrap();
//! writer.append(&row!["red", 0; 2.5]).unwrap();
//!
//! let out = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(
//!     out,
//!     "@RELATION colors\n\n\
//!      @ATTRIBUTE name STRING\n\
//!      @ATTRIBUTE hue NUMERIC\n\n\
//!      @DATA\n\
//!      'light blue',0.55\n\
//!      red,0,{2.5}\n"
//! );
//! ```

use crate::quoting::quote;
use crate::ser::to_row;
use crate::value::format_number;
use crate::{DataRow, DataType, Error, Relation, Result, WriterOptions};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Push-based ARFF writer over any byte sink.
pub struct Writer<W: Write> {
    relation: Relation,
    buf: String,
    dst: W,
    options: WriterOptions,
    line: usize,
    rows: usize,
}

impl Writer<File> {
    /// Creates (or truncates) the file at `path` and writes the header.
    ///
    /// The writer owns the file; it is closed by [`Writer::close`] or on drop.
    pub fn create<P: AsRef<Path>>(path: P, relation: &Relation) -> Result<Self> {
        Self::create_with_options(path, relation, WriterOptions::default())
    }

    pub fn create_with_options<P: AsRef<Path>>(
        path: P,
        relation: &Relation,
        options: WriterOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        // validate before touching the file system
        relation.validate()?;
        let file = File::create(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Created ARFF file");
        Self::with_options(file, relation, options)
    }
}

impl<W: Write> Writer<W> {
    /// Creates a writer and emits the header for `relation`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingRelationName`], [`Error::MissingAttributeName`]
    /// or [`Error::AttributeRedefined`] if the relation is malformed, and with
    /// [`Error::Io`] if the sink rejects the header.
    pub fn new(dst: W, relation: &Relation) -> Result<Self> {
        Self::with_options(dst, relation, WriterOptions::default())
    }

    pub fn with_options(dst: W, relation: &Relation, options: WriterOptions) -> Result<Self> {
        relation.validate()?;
        let mut writer = Writer {
            relation: relation.clone(),
            buf: String::with_capacity(256),
            dst,
            options,
            line: 0,
            rows: 0,
        };
        writer.write_header()?;
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<()> {
        let eol = self.options.terminator.as_str();
        self.buf.clear();

        self.buf.push_str("@RELATION ");
        self.buf.push_str(&quote(&self.relation.name));
        self.buf.push_str(eol);
        self.buf.push_str(eol);
        for attr in &self.relation.attributes {
            self.buf.push_str("@ATTRIBUTE ");
            self.buf.push_str(&quote(&attr.name));
            self.buf.push(' ');
            match attr.data_type {
                DataType::Nominal => {
                    self.buf.push('{');
                    for (i, value) in attr.nominal_values.iter().enumerate() {
                        if i > 0 {
                            self.buf.push(',');
                        }
                        self.buf.push_str(&quote(value));
                    }
                    self.buf.push('}');
                }
                other => self.buf.push_str(other.as_str()),
            }
            self.buf.push_str(eol);
        }
        self.buf.push_str(eol);
        self.buf.push_str("@DATA");
        self.buf.push_str(eol);

        self.flush_buf()?;
        self.line = self.relation.len() + 4;
        tracing::debug!(
            relation = %self.relation.name,
            attributes = self.relation.len(),
            "Wrote ARFF header"
        );
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        let result = self
            .dst
            .write_all(self.buf.as_bytes())
            .and_then(|()| self.dst.flush());
        self.buf.clear();
        result.map_err(Error::from)
    }

    /// The relation this writer was created with.
    #[inline]
    #[must_use]
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Number of rows appended so far.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Appends one data row.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AttributeMismatch`] unless the row has exactly one
    /// value per attribute; nothing is written in that case.
    pub fn append(&mut self, row: &DataRow) -> Result<()> {
        let line = self.line + 1;
        let expected = self.relation.len();
        if row.len() != expected {
            return Err(Error::AttributeMismatch {
                line,
                expected,
                found: row.len(),
            });
        }

        self.buf.clear();
        for (i, value) in row.values.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.buf.push_str(&value.to_string());
        }
        if row.is_weighted() {
            self.buf.push_str(",{");
            self.buf.push_str(&format_number(row.weight));
            self.buf.push('}');
        }
        self.buf.push_str(self.options.terminator.as_str());

        self.flush_buf()?;
        self.line = line;
        self.rows += 1;
        tracing::trace!(line, values = row.len(), weight = row.weight, "Wrote ARFF row");
        Ok(())
    }

    /// Serializes `record` and appends it with the given weight.
    ///
    /// Struct fields and map keys are matched to attributes by name, tuples and
    /// sequences by position. Attributes a struct does not mention are written
    /// as missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Serialize;
    /// use serde_arff::{Attribute, Relation, Writer};
    ///
    /// #[derive(Serialize)]
    /// struct Flower<'a> {
    ///     class: &'a str,
    ///     petal_length: f64,
    /// }
    ///
    /// let relation = Relation::new("iris")
    ///     .with_attribute(Attribute::numeric("petal_length"))
    ///     .unwrap()
    ///     .with_attribute(Attribute::nominal("class", ["setosa", "virginica"]))
    ///     .unwrap();
    ///
    /// let mut writer = Writer::new(Vec::new(), &relation).unwrap();
    /// writer.append_record(&Flower { class: "setosa", petal_length: 1.4 }, 0.0).unwrap();
    /// writer.append_record(&(5.1, "virginica"), 2.0).unwrap();
    ///
    /// let out = String::from_utf8(writer.into_inner()).unwrap();
    /// assert!(out.ends_with("@DATA\n1.4,setosa\n5.1,virginica,{2}\n"));
    /// ```
    pub fn append_record<T>(&mut self, record: &T, weight: f64) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let values = to_row(&self.relation, record).map_err(|e| e.at_line(self.line + 1))?;
        self.append(&DataRow { values, weight })
    }

    /// Flushes the sink and releases the writer.
    ///
    /// Files created through [`Writer::create`] are closed; caller-supplied
    /// sinks are dropped (pass `&mut sink` to keep using it).
    pub fn close(mut self) -> Result<()> {
        self.dst.flush()?;
        tracing::debug!(
            relation = %self.relation.name,
            rows = self.rows,
            "Closed ARFF writer"
        );
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, Terminator, Value};
    use chrono::{TimeZone, Utc};

    fn messy_relation() -> Relation {
        Relation::new("data relation")
            .with_attribute(Attribute::numeric("fo{o}"))
            .unwrap()
            .with_attribute(Attribute::string("bar"))
            .unwrap()
            .with_attribute(Attribute::date("baz"))
            .unwrap()
            .with_attribute(Attribute::numeric("bon"))
            .unwrap()
            .with_attribute(Attribute::nominal(
                "boo",
                ["ruby\nred", "green", "light blue"],
            ))
            .unwrap()
    }

    fn output(writer: Writer<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_messy_output() {
        let mut writer = Writer::new(Vec::new(), &messy_relation()).unwrap();
        let date = Utc.timestamp_opt(1_414_141_414, 0).unwrap();
        writer
            .append(&DataRow::new(vec![
                Value::Number(1.0),
                Value::from("x"),
                Value::Date(date),
                Value::Integer(7),
                Value::from("ruby\nred"),
            ]))
            .unwrap();
        writer
            .append(&DataRow::new(vec![
                Value::Number(2.3),
                Value::from("y"),
                Value::Missing,
                Value::Unsigned(6),
                Value::from("green"),
            ]))
            .unwrap();
        writer
            .append(
                &DataRow::new(vec![
                    Value::Number(-0.6),
                    Value::from("?"),
                    Value::Missing,
                    Value::Number(5.0),
                    Value::from("light blue"),
                ])
                .with_weight(5.3),
            )
            .unwrap();
        assert_eq!(writer.rows(), 3);

        let expected = "@RELATION 'data relation'\n\
            \n\
            @ATTRIBUTE 'fo{o}' NUMERIC\n\
            @ATTRIBUTE bar STRING\n\
            @ATTRIBUTE baz DATE\n\
            @ATTRIBUTE bon NUMERIC\n\
            @ATTRIBUTE boo {'ruby\\nred',green,'light blue'}\n\
            \n\
            @DATA\n\
            1,x,2014-10-24T09:03:34,7,'ruby\\nred'\n\
            2.3,y,?,6,green\n\
            -0.6,'?',?,5,'light blue',{5.3}\n";
        assert_eq!(output(writer), expected);
    }

    #[test]
    fn test_crlf_terminator() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::numeric("a"))
            .unwrap();
        let options = WriterOptions::new().with_terminator(Terminator::CrLf);
        let mut writer = Writer::with_options(Vec::new(), &relation, options).unwrap();
        writer.append(&DataRow::new(vec![Value::Number(1.0)])).unwrap();
        assert_eq!(
            output(writer),
            "@RELATION r\r\n\r\n@ATTRIBUTE a NUMERIC\r\n\r\n@DATA\r\n1\r\n"
        );
    }

    #[test]
    fn test_empty_nominal_set() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::nominal("z", Vec::<String>::new()))
            .unwrap();
        let writer = Writer::new(Vec::new(), &relation).unwrap();
        assert!(output(writer).contains("@ATTRIBUTE z {}\n"));
    }

    #[test]
    fn test_invalid_relation_is_rejected() {
        let mut sink = Vec::new();
        let err = Writer::new(&mut sink, &Relation::new("")).err().unwrap();
        assert_eq!(err, Error::MissingRelationName { line: 1 });
        assert!(sink.is_empty());
    }

    #[test]
    fn test_mismatch_writes_nothing() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::numeric("a"))
            .unwrap()
            .with_attribute(Attribute::numeric("b"))
            .unwrap();
        let mut writer = Writer::new(Vec::new(), &relation).unwrap();
        let err = writer
            .append(&DataRow::new(vec![Value::Number(1.0)]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::AttributeMismatch {
                line: 7,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(writer.rows(), 0);
        assert!(output(writer).ends_with("@DATA\n"));
    }

    #[test]
    fn test_append_record_errors_carry_line() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::date("d"))
            .unwrap();
        let mut writer = Writer::new(Vec::new(), &relation).unwrap();
        writer.append_record(&["2014-10-24T09:03:34Z"], 0.0).unwrap();
        let err = writer.append_record(&["soon"], 0.0).unwrap_err();
        assert_eq!(
            err,
            Error::NotDate {
                line: 7,
                token: "soon".to_string()
            }
        );
        assert!(output(writer).ends_with("@DATA\n2014-10-24T09:03:34\n"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_io() {
        let relation = Relation::new("r");
        let err = Writer::new(FailingSink, &relation).err().unwrap();
        assert_eq!(err, Error::Io("disk full".to_string()));
    }
}
