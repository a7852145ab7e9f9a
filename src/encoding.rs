//! Output encodings and their byte-order markers.
//!
//! Byte and file exports always start with the marker of the chosen encoding.
//! Spreadsheet tools use it to detect how the file is encoded; without it,
//! non-ASCII text in a UTF-8 file is usually shown garbled.

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Unicode encoding used for byte and file exports.
///
/// # Examples
///
/// ```rust
/// use csv_export::Encoding;
///
/// assert_eq!(Encoding::default(), Encoding::Utf8);
/// assert_eq!(Encoding::Utf8.bom(), &[0xEF, 0xBB, 0xBF]);
///
/// let mut out = Vec::new();
/// Encoding::Utf16Le.encode_into("A", &mut out);
/// assert_eq!(out, vec![0x41, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Returns the byte-order marker written ahead of the encoded text.
    #[inline]
    #[must_use]
    pub const fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &UTF8_BOM,
            Encoding::Utf16Le => &UTF16_LE_BOM,
            Encoding::Utf16Be => &UTF16_BE_BOM,
            Encoding::Utf32Le => &UTF32_LE_BOM,
            Encoding::Utf32Be => &UTF32_BE_BOM,
        }
    }

    /// Returns a short label for log output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Utf32Le => "UTF-32LE",
            Encoding::Utf32Be => "UTF-32BE",
        }
    }

    /// Appends `text` to `out` in this encoding, without a BOM.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        match self {
            Encoding::Utf8 => out.extend_from_slice(text.as_bytes()),
            Encoding::Utf16Le => {
                out.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Encoding::Utf16Be => {
                out.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
            Encoding::Utf32Le => {
                out.reserve(text.len() * 4);
                for ch in text.chars() {
                    out.extend_from_slice(&u32::from(ch).to_le_bytes());
                }
            }
            Encoding::Utf32Be => {
                out.reserve(text.len() * 4);
                for ch in text.chars() {
                    out.extend_from_slice(&u32::from(ch).to_be_bytes());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_bom_variants() {
        let boms = vec![
            (Encoding::Utf8, vec![0xEF, 0xBB, 0xBF]),
            (Encoding::Utf16Le, vec![0xFF, 0xFE]),
            (Encoding::Utf16Be, vec![0xFE, 0xFF]),
            (Encoding::Utf32Le, vec![0xFF, 0xFE, 0x00, 0x00]),
            (Encoding::Utf32Be, vec![0x00, 0x00, 0xFE, 0xFF]),
        ];

        for (encoding, expected) in boms {
            assert_eq!(encoding.bom(), expected.as_slice(), "{}", encoding.name());
        }
    }

    #[test]
    fn test_utf8_passthrough() {
        let mut out = Vec::new();
        Encoding::Utf8.encode_into("Zürich", &mut out);
        assert_eq!(out, "Zürich".as_bytes());
    }

    #[test]
    fn test_utf16_surrogate_pair() {
        // U+1F600 encodes as D83D DE00
        let mut le = Vec::new();
        Encoding::Utf16Le.encode_into("\u{1F600}", &mut le);
        assert_eq!(le, vec![0x3D, 0xD8, 0x00, 0xDE]);

        let mut be = Vec::new();
        Encoding::Utf16Be.encode_into("\u{1F600}", &mut be);
        assert_eq!(be, vec![0xD8, 0x3D, 0xDE, 0x00]);
    }

    #[test]
    fn test_utf32_code_points() {
        let mut le = Vec::new();
        Encoding::Utf32Le.encode_into("é", &mut le);
        assert_eq!(le, vec![0xE9, 0x00, 0x00, 0x00]);

        let mut be = Vec::new();
        Encoding::Utf32Be.encode_into("é", &mut be);
        assert_eq!(be, vec![0x00, 0x00, 0x00, 0xE9]);
    }
}
