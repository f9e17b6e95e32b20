use std::str::from_utf8;

use crate::error::{array_at, slice_at, DecodeError};

pub use self::value::AttributeValue;
pub use flatgeobuf::ColumnType;

pub mod value;

/// A column of the attribute schema declared in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Decodes a feature's property buffer against the header's columns
///
/// The buffer is a sequence of entries, each consisting of a little-endian
/// `u16` column index followed by the value. `Long` and `Double` values take
/// 8 bytes, `String` values are prefixed with their `u32` byte length. The
/// whole buffer must be consumed.
pub fn decode_properties(
    properties: &[u8],
    columns: &[ColumnSpec],
) -> Result<Vec<(String, AttributeValue)>, DecodeError> {
    let mut result = Vec::new();

    let mut pos = 0;
    while pos < properties.len() {
        let index = u16::from_le_bytes(array_at(properties, pos)?);
        let column = columns
            .get(usize::from(index))
            .ok_or(DecodeError::SchemaViolation {
                index,
                len: columns.len(),
            })?;

        let value = match column.column_type {
            ColumnType::Long => {
                // integers are passed on as doubles
                let v = u64::from_le_bytes(array_at(properties, pos + 2)?);
                pos += 2 + 8;
                AttributeValue::from(v)
            }

            ColumnType::Double => {
                let v = f64::from_le_bytes(array_at(properties, pos + 2)?);
                pos += 2 + 8;
                AttributeValue::from(v)
            }

            ColumnType::String => {
                let len = u32::from_le_bytes(array_at(properties, pos + 2)?) as usize;
                let bytes = slice_at(properties, pos + 6, len)?;
                let s = from_utf8(bytes).map_err(|source| DecodeError::InvalidUtf8 {
                    column: column.name.clone(),
                    source,
                })?;
                pos += 2 + 4 + len;
                AttributeValue::from(s)
            }

            t => {
                return Err(DecodeError::UnsupportedType {
                    column: column.name.clone(),
                    code: t.0,
                })
            }
        };

        result.push((column.name.clone(), value));
    }

    Ok(result)
}
