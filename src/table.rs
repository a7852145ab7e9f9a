//! The table builder.
//!
//! [`CsvExport`] owns the export settings, the column registry and the rows.
//! Rows are filled through a permissive builder surface:
//!
//! - [`add_row`](CsvExport::add_row) starts a new row and makes it current
//! - [`set_field`](CsvExport::set_field) writes a named cell of the current row
//! - [`add_rows`](CsvExport::add_rows) adds one row per serde record
//!
//! Only the most recently added row can be written. Setting a field before any
//! row exists is a no-op.

use crate::emit::{self, Lines};
use crate::format::format_value;
use crate::record::record_fields;
use crate::{ColumnRegistry, Encoding, ExportOptions, Result, Row, Value};
use log::{debug, trace};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Builds a delimited text export one row at a time.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use csv_export::CsvExport;
///
/// let mut export = CsvExport::new();
///
/// export.add_row();
/// export.set_field("Region", "Los Angeles, USA");
/// export.set_field("Sales", 100000);
/// export.set_field("Date Opened", NaiveDate::from_ymd_opt(2003, 12, 31).unwrap());
///
/// export.add_row();
/// export.set_field("Region", "Canberra \"in\" Australia");
/// export.set_field("Sales", 50000);
/// export.set_field(
///     "Date Opened",
///     NaiveDate::from_ymd_opt(2005, 1, 1).unwrap().and_hms_opt(9, 30, 0).unwrap(),
/// );
///
/// assert_eq!(
///     export.export(),
///     "sep=,\r\n\
///      Region,Sales,Date Opened\r\n\
///      \"Los Angeles, USA\",100000,2003-12-31\r\n\
///      \"Canberra \"\"in\"\" Australia\",50000,2005-01-01 09:30:00\r\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvExport {
    options: ExportOptions,
    registry: ColumnRegistry,
    rows: Vec<Row>,
}

impl CsvExport {
    /// Creates an empty table with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeparator`](crate::Error::InvalidSeparator) when
    /// the separator is empty.
    pub fn with_options(options: ExportOptions) -> Result<Self> {
        options.validate()?;
        debug!(
            "csv export created: separator={:?} preamble={} header={} encoding={}",
            options.separator.as_str(),
            options.include_preamble,
            options.include_header,
            options.encoding.name()
        );
        Ok(CsvExport {
            options,
            registry: ColumnRegistry::new(),
            rows: Vec::new(),
        })
    }

    /// Returns the options this table was built with.
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Returns the column registry.
    #[must_use]
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Returns the column names in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.names()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Starts a new, empty row. Call this before setting any fields on a row.
    pub fn add_row(&mut self) {
        self.rows.push(Row::with_capacity(self.registry.len()));
    }

    /// Sets a field on the current row, registering the column on first use.
    ///
    /// The value is formatted immediately with this table's separator. When no
    /// row has been added yet the value is dropped and the column is not
    /// registered.
    ///
    /// ```rust
    /// use csv_export::CsvExport;
    ///
    /// let mut export = CsvExport::new();
    /// export.set_field("Ignored", 1);
    /// assert_eq!(export.column_count(), 0);
    /// ```
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) {
        let Some(row) = self.rows.last_mut() else {
            trace!("dropping field {:?}: no row has been added", name);
            return;
        };

        let position = self.registry.ensure(name);
        let field = format_value(&value.into(), self.options.separator.as_str());
        row.set(position, field);
    }

    /// Adds one row per record, mapping record fields to columns in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`](crate::Error::UnsupportedType) when a
    /// record is not a flat struct or map, or any error its `Serialize` impl
    /// raises. Records before the failing one stay in the table.
    ///
    /// ```rust
    /// use csv_export::CsvExport;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Item { id: u32, name: &'static str }
    ///
    /// let mut export = CsvExport::new();
    /// export.add_rows(&[Item { id: 123, name: "Ffff" }, Item { id: 321, name: "ddd" }]).unwrap();
    /// assert_eq!(export.export(), "sep=,\r\nid,name\r\n123,Ffff\r\n321,ddd\r\n");
    /// ```
    pub fn add_rows<I, T>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let mut added = 0usize;
        for record in records {
            let fields = record_fields(&record)?;
            self.add_row();
            for (name, value) in fields {
                self.set_field(&name, value);
            }
            added += 1;
        }
        debug!("added {} record rows ({} columns)", added, self.registry.len());
        Ok(())
    }

    /// Returns the output as a lazy sequence of lines without terminators.
    #[must_use]
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(&self.options, &self.registry, &self.rows)
    }

    /// Exports the table as text, every line terminated by CRLF.
    #[must_use]
    pub fn export(&self) -> String {
        emit::collect_text(self.lines())
    }

    /// Exports the table as bytes in the configured encoding, BOM first.
    #[must_use]
    pub fn export_to_bytes(&self) -> Vec<u8> {
        self.export_to_bytes_with(self.options.encoding)
    }

    /// Exports the table as bytes in `encoding`, BOM first.
    #[must_use]
    pub fn export_to_bytes_with(&self, encoding: Encoding) -> Vec<u8> {
        emit::collect_bytes(self.lines(), encoding)
    }

    /// Streams the byte export to `writer` in the configured encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn export_to_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        self.export_to_writer_with(writer, self.options.encoding)
    }

    /// Streams the byte export to `writer` in `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn export_to_writer_with<W: io::Write>(
        &self,
        mut writer: W,
        encoding: Encoding,
    ) -> Result<()> {
        emit::write_lines(self.lines(), &mut writer, encoding)?;
        debug!(
            "exported {} rows x {} columns as {}",
            self.rows.len(),
            self.registry.len(),
            encoding.name()
        );
        Ok(())
    }

    /// Writes the byte export to `path` in the configured encoding, replacing
    /// any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be written.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.export_to_file_with(path, self.options.encoding)
    }

    /// Writes the byte export to `path` in `encoding`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be written.
    pub fn export_to_file_with<P: AsRef<Path>>(&self, path: P, encoding: Encoding) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.export_to_bytes_with(encoding))?;
        debug!(
            "exported {} rows x {} columns to {}",
            self.rows.len(),
            self.registry.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Separator};

    #[test]
    fn test_missing_columns() {
        let mut export = CsvExport::new();
        export.add_row();
        export.set_field("Region", "Los Angeles, USA");
        export.set_field("Sales", 100000);

        export.add_row();
        export.set_field("Region", "Canberra \"in\" Australia");
        export.set_field("Date Opened", "2005-01-01 09:30:00");

        assert_eq!(
            export.export(),
            "sep=,\r\n\
             Region,Sales,Date Opened\r\n\
             \"Los Angeles, USA\",100000,\r\n\
             \"Canberra \"\"in\"\" Australia\",,2005-01-01 09:30:00\r\n"
        );
    }

    #[test]
    fn test_field_before_first_row_is_dropped() {
        let mut export = CsvExport::new();
        export.set_field("Ghost", "boo");
        assert_eq!(export.column_count(), 0);
        assert_eq!(export.row_count(), 0);
        assert_eq!(export.export(), "sep=,\r\n");
    }

    #[test]
    fn test_only_current_row_is_written() {
        let mut export = CsvExport::new();
        export.add_row();
        export.set_field("a", 1);
        export.add_row();
        export.set_field("a", 2);
        assert_eq!(export.rows()[0].get(0), "1");
        assert_eq!(export.rows()[1].get(0), "2");
    }

    #[test]
    fn test_overwrite_field_in_same_row() {
        let mut export = CsvExport::new();
        export.add_row();
        export.set_field("a", "first");
        export.set_field("a", "second");
        assert_eq!(export.column_count(), 1);
        assert_eq!(export.rows()[0].get(0), "second");
    }

    #[test]
    fn test_rows_keep_stored_length() {
        let mut export = CsvExport::new();
        export.add_row();
        export.set_field("a", 1);
        export.add_row();
        export.set_field("b", 2);
        export.set_field("c", 3);

        // Row one was started before b and c existed and is not backfilled.
        assert_eq!(export.rows()[0].stored_len(), 1);
        assert_eq!(export.lines().last().unwrap(), ",2,3");
        assert_eq!(export.lines().nth(2).unwrap(), "1,,");
    }

    #[test]
    fn test_quoting_follows_configured_separator() {
        let options = ExportOptions::new().with_separator(Separator::Semicolon);
        let mut export = CsvExport::with_options(options).unwrap();
        export.add_row();
        export.set_field("Name", "Smith, John");
        export.set_field("Note", "a;b");
        assert_eq!(export.export(), "sep=;\r\nName;Note\r\nSmith, John;\"a;b\"\r\n");
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        let result = CsvExport::with_options(ExportOptions::new().with_separator(""));
        assert!(matches!(result, Err(Error::InvalidSeparator(_))));
    }

    #[test]
    fn test_header_and_preamble_toggles() {
        let options = ExportOptions::new().with_preamble(false).with_header(false);
        let mut export = CsvExport::with_options(options).unwrap();
        export.add_row();
        export.set_field("x", 1);
        assert_eq!(export.export(), "1\r\n");
    }

    #[test]
    fn test_failed_record_keeps_earlier_rows() {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Record {
            Flat { id: u32 },
            Nested { id: u32, tags: Vec<u32> },
        }

        let mut export = CsvExport::new();
        let records = vec![
            Record::Flat { id: 1 },
            Record::Nested { id: 2, tags: vec![3] },
        ];
        let result = export.add_rows(&records);
        assert!(matches!(result, Err(Error::UnsupportedType(_))));
        assert_eq!(export.row_count(), 1);
    }

    #[test]
    fn test_bytes_use_configured_encoding() {
        let options = ExportOptions::new()
            .with_preamble(false)
            .with_encoding(Encoding::Utf16Le);
        let mut export = CsvExport::with_options(options).unwrap();
        export.add_row();
        export.set_field("k", "v");

        let bytes = export.export_to_bytes();
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(&bytes[2..4], &[b'k', 0]);
        assert_eq!(bytes.len(), 2 + 2 * "k\r\nv\r\n".len());
    }
}
