//! Manifest resources (`<manifest>` within the `.opf` package document).

use crate::epub::consts;
use std::collections::HashMap;

/// A resource declared by the manifest: a chapter, stylesheet, image or
/// navigation document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) media_type: String,
}

impl ManifestItem {
    /// The unique id of the item within the archive.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The href exactly as declared, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The archive path of the item: the content base path applied to the
    /// (percent-decoded) href.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared media type, such as `application/xhtml+xml`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns `true` for every `image/*` media type, including SVG.
    pub fn is_image(&self) -> bool {
        self.media_type.contains(consts::IMAGE_TYPE_MARKER)
    }

    /// Returns `true` for scalable vector graphics, which are kept as text.
    pub fn is_svg(&self) -> bool {
        self.media_type == consts::SVG_TYPE
    }

    /// Returns `true` for CSS stylesheets.
    pub fn is_stylesheet(&self) -> bool {
        self.media_type == consts::CSS_TYPE
    }

    /// Returns `true` for the EPUB 2 NCX navigation document.
    pub fn is_ncx(&self) -> bool {
        self.media_type == consts::NCX_TYPE
    }
}

/// The full set of resources in the package, keyed by id.
///
/// Items keep their declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    items: Vec<ManifestItem>,
    by_id: HashMap<String, usize>,
}

impl Manifest {
    /// Inserts an item, returning it back if its id is already taken.
    pub(crate) fn insert(&mut self, item: ManifestItem) -> Result<(), ManifestItem> {
        if self.by_id.contains_key(&item.id) {
            return Err(item);
        }
        self.by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Returns the item with the given `id`.
    pub fn by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Returns the first item declared with the given href, or located at the given archive path.
    pub fn by_href(&self, href: &str) -> Option<&ManifestItem> {
        self.items
            .iter()
            .find(|item| item.href == href || item.path == href)
    }

    /// Every item in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestItem> {
        self.items.iter()
    }

    /// Every image item in declaration order.
    pub fn images(&self) -> impl Iterator<Item = &ManifestItem> + '_ {
        self.iter().filter(|item| item.is_image())
    }

    /// Every stylesheet item in declaration order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &ManifestItem> + '_ {
        self.iter().filter(|item| item.is_stylesheet())
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the manifest declares no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestItem;
    type IntoIter = std::slice::Iter<'a, ManifestItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
