//! Configuration options for CSV export.
//!
//! This module provides types to customize the exported text:
//!
//! - [`ExportOptions`]: Main configuration struct
//! - [`Separator`]: The string placed between fields
//!
//! Options are fixed when a [`CsvExport`](crate::CsvExport) is built and never
//! change afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use csv_export::{CsvExport, ExportOptions, Separator};
//!
//! // Semicolon separated, no `sep=` line
//! let options = ExportOptions::new()
//!     .with_separator(Separator::Semicolon)
//!     .with_preamble(false);
//!
//! let mut export = CsvExport::with_options(options).unwrap();
//! export.add_row();
//! export.set_field("City", "Paris; France");
//! assert_eq!(export.export(), "City\r\n\"Paris; France\"\r\n");
//! ```

use crate::{Encoding, Error, Result};

/// Field separator for the exported text.
///
/// Any non-empty string is accepted through [`Separator::Custom`]. The named
/// variants cover the separators spreadsheet tools recognize out of the box.
///
/// # Examples
///
/// ```rust
/// use csv_export::Separator;
///
/// assert_eq!(Separator::Comma.as_str(), ",");
/// assert_eq!(Separator::Semicolon.as_str(), ";");
/// assert_eq!(Separator::Tab.as_str(), "\t");
/// assert_eq!(Separator::Pipe.as_str(), "|");
/// assert_eq!(Separator::from(";"), Separator::Semicolon);
/// assert_eq!(Separator::from("||").as_str(), "||");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    Custom(String),
}

impl Separator {
    /// Returns the string representation of this separator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Tab => "\t",
            Separator::Pipe => "|",
            Separator::Custom(s) => s,
        }
    }
}

impl From<&str> for Separator {
    fn from(s: &str) -> Self {
        match s {
            "," => Separator::Comma,
            ";" => Separator::Semicolon,
            "\t" => Separator::Tab,
            "|" => Separator::Pipe,
            other => Separator::Custom(other.to_string()),
        }
    }
}

impl From<String> for Separator {
    fn from(s: String) -> Self {
        Separator::from(s.as_str())
    }
}

impl From<char> for Separator {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Separator::from(&*c.encode_utf8(&mut buf))
    }
}

/// Configuration options for CSV export.
///
/// | Option | Default | Effect |
/// |--------|---------|--------|
/// | `separator` | `,` | string between fields, also drives quoting |
/// | `include_preamble` | `true` | emit a leading `sep=<separator>` line |
/// | `include_header` | `true` | emit the column names line |
/// | `encoding` | UTF-8 | encoding and BOM for byte/file exports |
///
/// The preamble is on by default so that Excel opens the file without asking
/// which delimiter it uses.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub separator: Separator,
    pub include_preamble: bool,
    pub include_header: bool,
    pub encoding: Encoding,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            separator: Separator::default(),
            include_preamble: true,
            include_header: true,
            encoding: Encoding::default(),
        }
    }
}

impl ExportOptions {
    /// Creates default options (comma separator, preamble and header on, UTF-8).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csv_export::ExportOptions;
    ///
    /// let options = ExportOptions::new();
    /// assert!(options.include_preamble);
    /// assert!(options.include_header);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<Separator>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enables or disables the `sep=` preamble line.
    #[must_use]
    pub fn with_preamble(mut self, include: bool) -> Self {
        self.include_preamble = include;
        self
    }

    /// Enables or disables the header line.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets the default encoding used by byte and file exports.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Checks that the options describe a usable export.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeparator`] when the separator is empty.
    pub fn validate(&self) -> Result<()> {
        if self.separator.as_str().is_empty() {
            return Err(Error::invalid_separator("separator must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.separator, Separator::Comma);
        assert!(options.include_preamble);
        assert!(options.include_header);
        assert_eq!(options.encoding, Encoding::Utf8);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let options = ExportOptions::new()
            .with_separator('\t')
            .with_preamble(false)
            .with_header(false)
            .with_encoding(Encoding::Utf16Le);

        assert_eq!(options.separator, Separator::Tab);
        assert!(!options.include_preamble);
        assert!(!options.include_header);
        assert_eq!(options.encoding, Encoding::Utf16Le);
    }

    #[test]
    fn test_empty_separator_rejected() {
        let options = ExportOptions::new().with_separator("");
        assert!(matches!(options.validate(), Err(Error::InvalidSeparator(_))));
    }

    #[test]
    fn test_custom_separator_kept_verbatim() {
        let sep = Separator::from(String::from(" :: "));
        assert_eq!(sep, Separator::Custom(" :: ".to_string()));
        assert_eq!(sep.as_str(), " :: ");
    }
}
