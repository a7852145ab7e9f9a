//! Dynamic cell values.
//!
//! This module provides the [`Value`] enum, the closed set of things a cell can
//! hold. Everything handed to [`CsvExport::set_field`](crate::CsvExport::set_field)
//! is converted into a `Value` first, then rendered by
//! [`format_value`](crate::format_value).
//!
//! ## Core Types
//!
//! - [`Value`]: null, boolean, number, text or date/time
//! - [`Number`]: signed, unsigned or floating-point numbers
//!
//! ## Creating Values
//!
//! ```rust
//! use chrono::NaiveDate;
//! use csv_export::Value;
//!
//! let null = Value::from(None::<i32>);
//! let number = Value::from(100000);
//! let text = Value::from("Los Angeles, USA");
//! let date = Value::from(NaiveDate::from_ymd_opt(2003, 12, 31).unwrap());
//!
//! assert!(null.is_null());
//! assert!(number.is_number());
//! assert_eq!(text.as_str(), Some("Los Angeles, USA"));
//! assert!(date.is_datetime());
//! ```
//!
//! Types without a dedicated conversion go through their `Display`
//! implementation with [`Value::display`]:
//!
//! ```rust
//! use csv_export::Value;
//! use std::net::Ipv4Addr;
//!
//! let addr = Value::display(&Ipv4Addr::LOCALHOST);
//! assert_eq!(addr.as_str(), Some("127.0.0.1"));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::borrow::Cow;
use std::fmt;

/// A dynamically-typed cell value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    DateTime(NaiveDateTime),
}

/// A numeric cell value.
///
/// # Examples
///
/// ```rust
/// use csv_export::Number;
///
/// assert_eq!(Number::Integer(-7).to_string(), "-7");
/// assert_eq!(Number::Unsigned(u64::MAX).to_string(), "18446744073709551615");
/// assert_eq!(Number::Float(2.5).to_string(), "2.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Value {
    /// Wraps any `Display` value as text. This is the fallback for types
    /// without a dedicated `From` conversion.
    #[must_use]
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Text(value.to_string())
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a date/time.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    /// If the value is text, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a date/time, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

/// Writes the raw textual form: no trimming, truncation or quoting.
/// Null writes nothing; dates use the same layout as exported cells.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&crate::format::format_datetime(dt)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(value as i64))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Unsigned(value as u64))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Number(Number::Integer(v)),
            Err(_) => Value::Text(value.to_string()),
        }
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        match u64::try_from(value) {
            Ok(v) => Value::Number(Number::Unsigned(v)),
            Err(_) => Value::Text(value.to_string()),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(value: Cow<'a, str>) -> Self {
        Value::Text(value.into_owned())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

/// Timezone-aware values keep their wall-clock time in their own offset.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::DateTime(value.naive_local())
    }
}

/// `None` is the null marker for any nullable cell.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Number(Number::Integer(42)));
        assert_eq!(Value::from(42u8), Value::Number(Number::Unsigned(42)));
        assert_eq!(Value::from(3.5f64), Value::Number(Number::Float(3.5)));
        assert_eq!(Value::from('x'), Value::Text("x".to_string()));
        assert_eq!(Value::from("test"), Value::Text("test".to_string()));
        assert_eq!(
            Value::from(Cow::Borrowed("cow")),
            Value::Text("cow".to_string())
        );
    }

    #[test]
    fn test_wide_integers_fall_back_to_text() {
        assert_eq!(Value::from(5i128), Value::Number(Number::Integer(5)));
        assert_eq!(
            Value::from(u128::MAX),
            Value::Text(u128::MAX.to_string())
        );
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert!(Value::from(None::<String>).is_null());
        assert_eq!(Value::from(Some(7i64)), Value::Number(Number::Integer(7)));
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2003, 12, 31).unwrap();
        let value = Value::from(date);
        assert_eq!(
            value.as_datetime(),
            Some(&date.and_hms_opt(0, 0, 0).unwrap())
        );

        let utc = Utc.with_ymd_and_hms(2005, 1, 1, 9, 30, 0).unwrap();
        assert_eq!(Value::from(utc).to_string(), "2005-01-01 09:30:00");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2005, 1, 1, 9, 30, 0).unwrap();
        assert_eq!(Value::from(local).to_string(), "2005-01-01 09:30:00");
    }

    #[test]
    fn test_display_is_unformatted() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("  padded, text ").to_string(), "  padded, text ");
        assert_eq!(Value::from(false).to_string(), "false");
    }
}
