//! Package metadata (`<metadata>` within the `.opf` package document).

use crate::epub::consts;

/// The value(s) of a metadata element, with explicit cardinality.
///
/// Callers decide how to treat absence or multiplicity instead of
/// receiving a scalar-or-list value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataValue<'a> {
    /// No element with the requested tag exists.
    Empty,
    /// Exactly one element exists.
    Single(&'a str),
    /// Several elements exist, in document order.
    Multiple(Vec<&'a str>),
}

impl<'a> MetadataValue<'a> {
    fn from_values(mut values: Vec<&'a str>) -> Self {
        match values.len() {
            0 => Self::Empty,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    /// Returns `true` if no element exists.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Multiple(values) => values.len(),
        }
    }

    /// Returns the value if exactly one element exists.
    pub fn as_single(&self) -> Option<&'a str> {
        match self {
            Self::Single(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the first value in document order, regardless of cardinality.
    pub fn first(&self) -> Option<&'a str> {
        match self {
            Self::Empty => None,
            Self::Single(value) => Some(*value),
            Self::Multiple(values) => values.first().copied(),
        }
    }

    /// Returns every value in document order.
    pub fn to_vec(&self) -> Vec<&'a str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(value) => vec![*value],
            Self::Multiple(values) => values.clone(),
        }
    }
}

/// A single Dublin Core element from the package metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DublinCoreEntry {
    /// Local name, e.g. `title` for `dc:title`.
    pub(crate) tag: String,
    /// Trimmed text content.
    pub(crate) value: String,
}

/// Metadata details of a package: title, authors, subjects, rights, language,
/// publisher and identifiers.
///
/// Derived once per archive; immutable after parsing.
/// No field is mandatory (see [`IngestOptions::strict`](super::IngestOptions::strict)).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub(crate) entries: Vec<DublinCoreEntry>,
}

impl PackageMetadata {
    pub(crate) fn new(entries: Vec<DublinCoreEntry>) -> Self {
        Self { entries }
    }

    /// Returns all values of the Dublin Core element with the given local name
    /// (e.g. `"subject"` for `dc:subject`).
    pub fn get(&self, tag: &str) -> MetadataValue<'_> {
        MetadataValue::from_values(self.values(tag).collect())
    }

    fn values<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a str> + use<'a, 't> {
        self.entries
            .iter()
            .filter(move |entry| entry.tag == tag)
            .map(|entry| entry.value.as_str())
    }

    /// The first `dc:title`, if any.
    pub fn title(&self) -> Option<&str> {
        self.values(consts::DC_TITLE)
            .find(|title| !title.is_empty())
    }

    /// Every `dc:creator` in document order.
    ///
    /// Names are trimmed; duplicates are kept.
    pub fn authors(&self) -> Vec<&str> {
        self.values(consts::DC_CREATOR)
            .filter(|author| !author.is_empty())
            .collect()
    }

    /// Returns the author for display in a short space: the only author,
    /// or the first author followed by `...` when there are several.
    ///
    /// Returns [`None`] when there are no authors.
    pub fn author_display(&self) -> Option<String> {
        match self.authors().as_slice() {
            [] => None,
            [author] => Some((*author).to_owned()),
            [first, ..] => Some(format!("{first}...")),
        }
    }

    /// Every `dc:subject`.
    pub fn subjects(&self) -> MetadataValue<'_> {
        self.get(consts::DC_SUBJECT)
    }

    /// Every `dc:rights`.
    pub fn rights(&self) -> MetadataValue<'_> {
        self.get(consts::DC_RIGHTS)
    }

    /// Every `dc:language`.
    pub fn language(&self) -> MetadataValue<'_> {
        self.get(consts::DC_LANGUAGE)
    }

    /// Every `dc:publisher`.
    pub fn publisher(&self) -> MetadataValue<'_> {
        self.get(consts::DC_PUBLISHER)
    }

    /// Every `dc:identifier`.
    pub fn identifier(&self) -> MetadataValue<'_> {
        self.get(consts::DC_IDENTIFIER)
    }
}
