//! Entity resolution for lenient XML parsing.

use quick_xml::escape::{self, EscapeError};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// An immutable table of named entities available while parsing markup.
///
/// The default table covers the five predefined XML entities plus the full
/// HTML5 named character reference set, so documents relying on entities such as
/// `&nbsp;` or `&mdash;` (invalid in strict XML without a DTD) still parse.
/// Numeric character references (`&#160;`, `&#xA0;`) are always supported.
///
/// Cloning is cheap; the table is shared.
///
/// # Examples
/// ```
/// use epub_ingest::render::entities::EntityTable;
///
/// let table = EntityTable::default().with_entity("book", "Pride and Prejudice");
///
/// assert_eq!(Some("\u{a0}"), table.resolve("nbsp").as_deref());
/// assert_eq!(Some("Pride and Prejudice"), table.resolve("book").as_deref());
/// assert_eq!(None, EntityTable::xml().resolve("nbsp"));
/// ```
#[derive(Clone, Debug)]
pub struct EntityTable {
    html: bool,
    extra: Arc<HashMap<String, String>>,
}

impl EntityTable {
    /// A table with only the predefined XML entities
    /// (`lt`, `gt`, `amp`, `apos`, `quot`).
    pub fn xml() -> Self {
        Self {
            html: false,
            extra: Arc::default(),
        }
    }

    /// A table with the predefined XML entities and every HTML5 named character reference.
    pub fn html() -> Self {
        Self {
            html: true,
            ..Self::xml()
        }
    }

    /// Adds (or overrides) a named entity.
    pub fn with_entity(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.extra).insert(name.into(), value.into());
        self
    }

    /// Resolves an entity name (without the surrounding `&` and `;`).
    ///
    /// Names starting with `#` are treated as numeric character references.
    pub fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        match name.strip_prefix('#') {
            Some(code) => resolve_char_ref(code).map(|c| Cow::Owned(c.to_string())),
            None => self.resolve_named(name).map(Cow::Borrowed),
        }
    }

    fn resolve_named(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.extra.get(name) {
            return Some(value.as_str());
        }
        // `resolve_predefined_entity` also covers HTML5 names once `escape-html` is enabled
        let predefined = match name {
            "lt" => Some("<"),
            "gt" => Some(">"),
            "amp" => Some("&"),
            "apos" => Some("'"),
            "quot" => Some("\""),
            _ => None,
        };
        predefined.or_else(|| {
            if self.html {
                escape::resolve_html5_entity(name)
            } else {
                None
            }
        })
    }

    /// Unescapes every entity and character reference within `raw`.
    pub(crate) fn unescape<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, EscapeError> {
        escape::unescape_with(raw, |name| self.resolve_named(name))
    }
}

impl Default for EntityTable {
    fn default() -> Self {
        Self::html()
    }
}

fn resolve_char_ref(code: &str) -> Option<char> {
    let value = match code.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value).filter(|&c| c != '\0')
}
