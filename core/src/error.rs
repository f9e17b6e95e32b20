use thiserror::Error;

/// Errors that abort the decoding of a FlatGeobuf stream
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Parameters for the index size calculation are invalid
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The index would be too large to represent its size in bytes
    #[error("number of items must be less than 2^56 (got {0})")]
    Overflow(u64),

    /// The header declares a geometry type the decoder does not implement
    #[error("flatgeobuf has unsupported geometry type {0}")]
    UnsupportedGeometry(u8),

    /// A property refers to a column whose type the decoder does not implement
    #[error("flatgeobuf has unsupported type {code} in column `{column}'")]
    UnsupportedType { column: String, code: u8 },

    /// A property refers to a column that does not exist
    #[error("column index {index} out of range (header declares {len} columns)")]
    SchemaViolation { index: u16, len: usize },

    /// A read would exceed the bounds of the buffer
    #[error(
        "unexpected end of data: {needed} bytes needed at offset {offset} \
        but buffer has only {len} bytes"
    )]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A header or feature record is malformed
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A text attribute is not valid UTF-8
    #[error("value of column `{column}' is not valid UTF-8")]
    InvalidUtf8 {
        column: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The feature sink refused a feature
    #[error("feature sink failed: {0:#}")]
    Sink(anyhow::Error),
}

impl From<flatbuffers::InvalidFlatbuffer> for DecodeError {
    fn from(err: flatbuffers::InvalidFlatbuffer) -> Self {
        DecodeError::InvalidRecord(err.to_string())
    }
}

/// Returns `len` bytes of `buf` starting at `offset` or a
/// [`DecodeError::Truncated`] error if the range exceeds the buffer
pub(crate) fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DecodeError::Truncated {
            offset,
            needed: len,
            len: buf.len(),
        })
}

/// Reads a fixed-size array from `buf` at `offset`
pub(crate) fn array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    let mut result = [0u8; N];
    result.copy_from_slice(slice_at(buf, offset, N)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use super::{array_at, slice_at, DecodeError};

    #[test]
    fn slice_in_bounds() {
        let buf = [1u8, 2, 3, 4];
        assert_that!(slice_at(&buf, 1, 2).unwrap()).is_equal_to(&[2u8, 3][..]);
        assert_that!(slice_at(&buf, 4, 0).unwrap().len()).is_equal_to(0);
        assert_that!(array_at::<4>(&buf, 0).unwrap()).is_equal_to([1u8, 2, 3, 4]);
    }

    #[test]
    fn slice_out_of_bounds() {
        let buf = [1u8, 2, 3, 4];
        assert!(matches!(
            slice_at(&buf, 3, 2),
            Err(DecodeError::Truncated {
                offset: 3,
                needed: 2,
                len: 4
            })
        ));
        assert!(matches!(
            slice_at(&buf, usize::MAX, 2),
            Err(DecodeError::Truncated { .. })
        ));
    }
}
