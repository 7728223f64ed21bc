//! Percent-encoding used by taw URLs and the web auth token fragment.
//!
//! Encoding keeps ASCII alphanumerics and `- _ . ~` and escapes every other
//! byte as `%XX` with uppercase hex digits. Decoding additionally maps `+` to
//! a space and rejects malformed escapes instead of guessing.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};
use thiserror::Error;

/// Bytes left untouched by [`encode`] (RFC 3986 unreserved characters)
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape { offset: usize },
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,
}

/// Percent-encode arbitrary bytes
pub fn encode(value: impl AsRef<[u8]>) -> String {
    percent_encode(value.as_ref(), UNRESERVED).to_string()
}

/// Percent-decode a string into raw bytes.
///
/// Every `%` must be followed by exactly two hex digits.
pub fn decode(value: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while let Some(pos) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + pos;
        match bytes.get(at + 1..at + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i = at + 3,
            _ => return Err(DecodeError::MalformedEscape { offset: at }),
        }
    }

    // '+' never appears inside a valid escape, so swapping it first is safe
    let spaced = value.replace('+', " ");
    Ok(percent_decode_str(&spaced).collect())
}

/// Percent-decode a string, requiring the result to be UTF-8
pub fn decode_str(value: &str) -> Result<String, DecodeError> {
    String::from_utf8(decode(value)?).map_err(|_| DecodeError::InvalidUtf8)
}
