//! Record-to-row mapping through serde.
//!
//! [`CsvExport::add_rows`](crate::CsvExport::add_rows) turns each record into
//! an ordered list of `(column, value)` pairs. Any `T: Serialize` that
//! serializes as a struct or a map qualifies:
//!
//! - `#[derive(Serialize)]` structs yield their fields in declaration order,
//!   honouring `rename`, `skip` and friends
//! - maps yield their entries in iteration order
//! - a hand-written `Serialize` impl is an explicit column schema
//!
//! Fields must be flat. Scalars, strings, `Option`, unit and unit enum
//! variants map onto [`Value`]; nested sequences, maps and structs are
//! rejected with [`Error::UnsupportedType`].
//!
//! Strings always stay [`Value::Text`], exactly as with
//! [`set_field`](crate::CsvExport::set_field). To have a chrono field formatted
//! as a date, mark it with [`datetime`]:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Shop {
//!     region: &'static str,
//!     #[serde(serialize_with = "csv_export::record::datetime")]
//!     opened: NaiveDate,
//! }
//!
//! let shops = [Shop { region: "Oslo", opened: NaiveDate::from_ymd_opt(2003, 12, 31).unwrap() }];
//! let csv = csv_export::to_string(&shops).unwrap();
//! assert_eq!(csv, "sep=,\r\nregion,opened\r\nOslo,2003-12-31\r\n");
//! ```

use crate::{Error, Result, Value};
use chrono::NaiveDateTime;
use serde::ser::{self, Impossible, Serialize};

/// Flattens one record into `(column, value)` pairs.
pub(crate) fn record_fields<T: Serialize + ?Sized>(record: &T) -> Result<Vec<(String, Value)>> {
    record.serialize(RecordSerializer)
}

/// Converts a single field into a [`Value`].
pub(crate) fn field_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

const DATETIME_TOKEN: &str = "$csv_export::private::DateTime";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Serializes a chrono value so that record export treats it as a date.
///
/// Use with `#[serde(serialize_with = "csv_export::record::datetime")]` on
/// `NaiveDate`, `NaiveDateTime`, `DateTime<Tz>` or an `Option` of those.
/// Other serializers see the ISO 8601 wall-clock string.
///
/// # Errors
///
/// Fails when `value` does not convert into a date or null [`Value`].
pub fn datetime<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: Clone + Into<Value>,
    S: ser::Serializer,
{
    match value.clone().into() {
        Value::DateTime(dt) => serializer.serialize_newtype_struct(
            DATETIME_TOKEN,
            &dt.format(DATETIME_FORMAT).to_string(),
        ),
        Value::Null => serializer.serialize_none(),
        other => Err(ser::Error::custom(format!(
            "expected a date or time, found {:?}",
            other
        ))),
    }
}

fn unsupported<T>(what: &str) -> Result<T> {
    Err(Error::unsupported_type(what))
}

struct RecordSerializer;

type Fields = Vec<(String, Value)>;

impl ser::Serializer for RecordSerializer {
    type Ok = Fields;
    type Error = Error;

    type SerializeSeq = Impossible<Fields, Error>;
    type SerializeTuple = Impossible<Fields, Error>;
    type SerializeTupleStruct = Impossible<Fields, Error>;
    type SerializeTupleVariant = Impossible<Fields, Error>;
    type SerializeMap = FieldCollector;
    type SerializeStruct = FieldCollector;
    type SerializeStructVariant = FieldCollector;

    fn serialize_bool(self, _v: bool) -> Result<Fields> {
        unsupported("record must be a struct or map, found bool")
    }

    fn serialize_i8(self, v: i8) -> Result<Fields> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Fields> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Fields> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<Fields> {
        unsupported("record must be a struct or map, found integer")
    }

    fn serialize_i128(self, _v: i128) -> Result<Fields> {
        unsupported("record must be a struct or map, found integer")
    }

    fn serialize_u8(self, v: u8) -> Result<Fields> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Fields> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Fields> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<Fields> {
        unsupported("record must be a struct or map, found integer")
    }

    fn serialize_u128(self, _v: u128) -> Result<Fields> {
        unsupported("record must be a struct or map, found integer")
    }

    fn serialize_f32(self, v: f32) -> Result<Fields> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, _v: f64) -> Result<Fields> {
        unsupported("record must be a struct or map, found float")
    }

    fn serialize_char(self, _v: char) -> Result<Fields> {
        unsupported("record must be a struct or map, found char")
    }

    fn serialize_str(self, _v: &str) -> Result<Fields> {
        unsupported("record must be a struct or map, found string")
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Fields> {
        unsupported("record must be a struct or map, found bytes")
    }

    fn serialize_none(self) -> Result<Fields> {
        unsupported("record must be a struct or map, found none")
    }

    fn serialize_some<T>(self, value: &T) -> Result<Fields>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Fields> {
        unsupported("record must be a struct or map, found unit")
    }

    // A field-less struct is a record with no columns.
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Fields> {
        Ok(Vec::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Fields> {
        unsupported("record must be a struct or map, found unit variant")
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Fields>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Fields>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported("record must be a struct or map, found sequence")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported("record must be a struct or map, found tuple")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported("record must be a struct or map, found tuple struct")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("record must be a struct or map, found tuple variant")
    }

    fn serialize_map(self, len: Option<usize>) -> Result<FieldCollector> {
        Ok(FieldCollector::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<FieldCollector> {
        Ok(FieldCollector::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<FieldCollector> {
        Ok(FieldCollector::new(len))
    }
}

struct FieldCollector {
    fields: Fields,
    current_key: Option<String>,
}

impl FieldCollector {
    fn new(capacity: usize) -> Self {
        FieldCollector {
            fields: Vec::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeMap for FieldCollector {
    type Ok = Fields;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match field_value(key)? {
            Value::Text(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(Error::custom("Map keys must be strings or scalars")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        let value = field_value(value)?;
        self.fields.push((key, value));
        Ok(())
    }

    fn end(self) -> Result<Fields> {
        Ok(self.fields)
    }
}

impl ser::SerializeStruct for FieldCollector {
    type Ok = Fields;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key.to_string(), field_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Fields> {
        Ok(self.fields)
    }
}

impl ser::SerializeStructVariant for FieldCollector {
    type Ok = Fields;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key.to_string(), field_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Fields> {
        Ok(self.fields)
    }
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = Impossible<Value, Error>;
    type SerializeTuple = Impossible<Value, Error>;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = Impossible<Value, Error>;
    type SerializeStruct = Impossible<Value, Error>;
    type SerializeStructVariant = Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        unsupported("byte arrays cannot be written to a cell")
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        if name != DATETIME_TOKEN {
            return value.serialize(self);
        }
        match value.serialize(self)? {
            Value::Text(text) => NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
                .map(Value::DateTime)
                .map_err(|e| Error::custom(format!("invalid date {:?}: {}", text, e))),
            other => Ok(other),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        unsupported("newtype variants cannot be written to a cell")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported("sequences cannot be written to a cell")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported("tuples cannot be written to a cell")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported("tuple structs cannot be written to a cell")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("tuple variants cannot be written to a cell")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        unsupported("nested maps cannot be written to a cell")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        unsupported("nested structs cannot be written to a cell")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported("struct variants cannot be written to a cell")
    }
}
