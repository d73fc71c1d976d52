//! Supporting helpers shared across the pipeline.

pub(crate) mod str;
pub(crate) mod uri;
pub(crate) mod utf;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left untouched when building a URL-safe name.
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Returns a name (title or author) that can be used safely in a URL.
///
/// Spaces become `+` and every other reserved character is percent-encoded.
///
/// # Examples
/// ```
/// use epub_ingest::util::safe_name;
///
/// assert_eq!("John+Q.%2C+Commas", safe_name("John Q., Commas"));
/// ```
pub fn safe_name(name: &str) -> String {
    utf8_percent_encode(name, URL_SAFE)
        .to_string()
        .replace("%20", "+")
}

/// Reverses [`safe_name`], converting a URL-formatted name back into
/// something that matches the stored value.
pub fn unsafe_name(name: &str) -> String {
    percent_decode_str(&name.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
