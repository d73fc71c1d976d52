//! The canonical reading order (`<spine>` within the `.opf` package document).

/// A spine entry referencing a [`ManifestItem`](super::manifest::ManifestItem) by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineEntry {
    pub(crate) idref: String,
}

impl SpineEntry {
    /// The id of the referenced manifest item.
    pub fn idref(&self) -> &str {
        &self.idref
    }
}

/// The linear reading order of manifest items; order is positional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spine {
    pub(crate) entries: Vec<SpineEntry>,
    /// The `toc` attribute of the `<spine>` element.
    pub(crate) toc: Option<String>,
}

impl Spine {
    /// The id of the NCX manifest item, as declared by the `toc` attribute.
    pub fn toc_id(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    /// Every entry in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, SpineEntry> {
        self.entries.iter()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the spine contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Spine {
    type Item = &'a SpineEntry;
    type IntoIter = std::slice::Iter<'a, SpineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
