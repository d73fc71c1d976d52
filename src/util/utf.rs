use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

/// Specific error details regarding `UTF` conversion of archive entries.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UtfError {
    /// UTF-16 data (detected by its byte order mark) has an odd byte count.
    #[error("UTF-16 data needs to contain an even amount of bytes")]
    UnevenByteCount,
    /// Invalid UTF-8 data.
    #[error(transparent)]
    InvalidUtf8(FromUtf8Error),
    /// Invalid UTF-16 data.
    #[error(transparent)]
    InvalidUtf16(FromUtf16Error),
}

/// Converts UTF-16 (with a BOM) to UTF-8; anything else is returned untouched.
pub(crate) fn into_utf8(data: Vec<u8>) -> Result<Vec<u8>, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data).map(String::into_bytes)
    } else {
        Ok(data)
    }
}

pub(crate) fn into_utf8_str(data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data)
    } else {
        String::from_utf8(data).map_err(UtfError::InvalidUtf8)
    }
}

/// Best-effort text for display when strict decoding fails.
pub(crate) fn into_utf8_lossy(data: &[u8]) -> String {
    match into_utf8_str(data.to_vec()) {
        Ok(text) => text,
        Err(_) => String::from_utf8_lossy(data).into_owned(),
    }
}

fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let utf16 = data[2..]
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount)?;

    String::from_utf16(&utf16).map_err(UtfError::InvalidUtf16)
}
