//! JSON text encoding compatible with ECMAScript `JSON.stringify`.
//!
//! Partition keys already assigned by producers written against a JavaScript
//! runtime depend on the exact bytes of the encoded text, so two details
//! differ from plain `serde_json::to_string`:
//!
//! - Numbers use the ECMAScript Number-to-string layout (`1.0` is `1`,
//!   `1e21` is `1e+21`, `-0` is `0`). Integers beyond 2^53 are rounded to
//!   the nearest double first, as a JavaScript producer would have read them.
//! - Object keys that are canonical array indices come first, in ascending
//!   numeric order, followed by the remaining keys in insertion order.
//!
//! Output is compact and strings are escaped the same way in both worlds.

use std::{fmt, io};

use dpk_core::Result;
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::ser::{CompactFormatter, Formatter};
use serde_json::Value;

/// Encodes any serializable value as JSON text.
pub fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    value_to_json_text(&value)
}

/// Encodes a JSON value as text.
pub fn value_to_json_text(value: &Value) -> Result<String> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, EcmaFormatter);
    EcmaValue(value).serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| serde_json::Error::custom(e).into())
}

/// Serializes a value with ECMAScript object key ordering.
struct EcmaValue<'a>(&'a Value);

impl Serialize for EcmaValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(EcmaValue)),
            Value::Object(map) => {
                let mut indexed: Vec<(u32, &String, &Value)> = map
                    .iter()
                    .filter_map(|(key, value)| array_index(key).map(|index| (index, key, value)))
                    .collect();
                indexed.sort_by_key(|(index, _, _)| *index);

                let named = map.iter().filter(|(key, _)| array_index(key).is_none());

                serializer.collect_map(
                    indexed
                        .into_iter()
                        .map(|(_, key, value)| (key, value))
                        .chain(named)
                        .map(|(key, value)| (key, EcmaValue(value))),
                )
            }
            other => other.serialize(serializer),
        }
    }
}

/// Returns the index if `key` is a canonical array index (0 to 2^32 - 2).
fn array_index(key: &str) -> Option<u32> {
    let canonical = key == "0" || !key.starts_with('0');
    if key.is_empty() || !canonical || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

/// Largest magnitude up to which every integer is exactly a double.
const MAX_SAFE_MAGNITUDE: u128 = 1 << 53;

/// Compact formatter with ECMAScript number layout.
struct EcmaFormatter;

impl EcmaFormatter {
    fn write_integer<W, N>(&mut self, writer: &mut W, magnitude: u128, value: N) -> io::Result<()>
    where
        W: ?Sized + io::Write,
        N: fmt::Display + AsDouble,
    {
        if magnitude > MAX_SAFE_MAGNITUDE {
            self.write_f64(writer, value.as_double())
        } else {
            write!(writer, "{value}")
        }
    }
}

/// Nearest double, as a JavaScript number parse would produce.
trait AsDouble {
    fn as_double(&self) -> f64;
}

macro_rules! impl_as_double {
    ($($int:ty),*) => {
        $(impl AsDouble for $int {
            fn as_double(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_as_double!(i64, u64, i128, u128);

impl Formatter for EcmaFormatter {
    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, u128::from(value.unsigned_abs()), value)
    }

    fn write_u64<W>(&mut self, writer: &mut W, value: u64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, u128::from(value), value)
    }

    fn write_i128<W>(&mut self, writer: &mut W, value: i128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, value.unsigned_abs(), value)
    }

    fn write_u128<W>(&mut self, writer: &mut W, value: u128) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_integer(writer, value, value)
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut shortest = Vec::with_capacity(24);
        CompactFormatter.write_f64(&mut shortest, value)?;
        let shortest = std::str::from_utf8(&shortest)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let text = ecma_number(shortest, value < 0.0)?;
        writer.write_all(text.as_bytes())
    }
}

/// Re-lays the shortest round-trip digits of a finite number.
///
/// `shortest` is any decimal rendering of the value (`123.0`, `1e21`,
/// `1.5e-7`). The result follows ECMA-262 Number::toString.
fn ecma_number(shortest: &str, negative: bool) -> io::Result<String> {
    let unsigned = shortest.trim_start_matches('-');
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => (
            mantissa,
            exponent
                .parse::<i32>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        ),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = format!("{whole}{fraction}");
    let leading_zeros = all_digits.len() - all_digits.trim_start_matches('0').len();
    let digits = all_digits.trim_matches('0');
    if digits.is_empty() {
        return Ok("0".to_string());
    }

    // Position of the decimal point relative to the first significant digit.
    let point = whole.len() as i32 + exponent - leading_zeros as i32;
    let sign = if negative { "-" } else { "" };
    Ok(format!("{sign}{}", layout(digits, point)))
}

fn layout(digits: &str, point: i32) -> String {
    let count = digits.len() as i32;

    if count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let exponent = point - 1;
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.unsigned_abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.unsigned_abs())
        }
    }
}
