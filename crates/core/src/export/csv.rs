//! Minimal RFC 4180 CSV writer.
//!
//! Fields containing the delimiter, quotes or line breaks are quoted and
//! inner quotes doubled, so embedded commas can no longer corrupt a row.

use std::borrow::Cow;

/// Quotes a field when it contains a delimiter, quote or line break.
#[must_use]
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Builds a CSV document row by row with a fixed column count.
#[derive(Debug)]
pub struct CsvBuilder {
    buf: String,
    columns: usize,
}

impl CsvBuilder {
    /// Starts a document with the given header row.
    #[must_use]
    pub fn new(header: &[&str]) -> Self {
        let mut builder = Self {
            buf: String::new(),
            columns: header.len(),
        };
        builder.push_row(header.iter().copied());
        builder
    }

    /// Appends a data row. Rows shorter than the header are padded with
    /// empty fields; longer rows are truncated to the header width.
    pub fn row<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected: Vec<String> = fields
            .into_iter()
            .take(self.columns)
            .map(|f| f.as_ref().to_string())
            .collect();
        collected.resize(self.columns, String::new());
        self.push_row(collected.iter().map(String::as_str));
        self
    }

    fn push_row<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut first = true;
        for field in fields {
            if !first {
                self.buf.push(',');
            }
            first = false;
            self.buf.push_str(&escape_field(field));
        }
        self.buf.push_str("\r\n");
    }

    /// Returns the finished document.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_are_untouched() {
        assert_eq!(escape_field("abc"), "abc");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_comma_forces_quoting() {
        assert_eq!(escape_field("Doe, Jane"), "\"Doe, Jane\"");
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(escape_field("the \"big\" one"), "\"the \"\"big\"\" one\"");
    }

    #[test]
    fn test_newlines_force_quoting() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_document_layout() {
        let mut builder = CsvBuilder::new(&["Student ID", "Name", "Program"]);
        builder.row(["STU260001", "Doe, Jane", "Massage Therapy"]);
        builder.row(["STU260002", "Smith", "Nursing"]);
        let doc = builder.finish();

        assert_eq!(
            doc,
            "Student ID,Name,Program\r\n\
             STU260001,\"Doe, Jane\",Massage Therapy\r\n\
             STU260002,Smith,Nursing\r\n"
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut builder = CsvBuilder::new(&["a", "b", "c"]);
        builder.row(["1"]);
        assert_eq!(builder.finish(), "a,b,c\r\n1,,\r\n");
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let mut builder = CsvBuilder::new(&["a", "b"]);
        builder.row(["1", "2", "3"]);
        assert_eq!(builder.finish(), "a,b\r\n1,2\r\n");
    }
}
