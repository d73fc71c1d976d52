//! Stylesheets and images extracted from the manifest.

use crate::render::css::ScopedStylesheet;

/// A CSS stylesheet with its scoped rendition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetAsset {
    pub(crate) idref: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) raw: String,
    pub(crate) scoped: ScopedStylesheet,
}

impl StylesheetAsset {
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// The manifest href, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The archive path the stylesheet was read from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stylesheet exactly as stored in the archive.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The stylesheet with every top-level rule scoped to the chapter container.
    ///
    /// Equal to [`Self::raw`] if the stylesheet could not be parsed at all;
    /// see [`Self::scoping`] for details.
    pub fn css(&self) -> &str {
        &self.scoped.css
    }

    /// The full result of scoping, including per-rule outcomes.
    pub fn scoping(&self) -> &ScopedStylesheet {
        &self.scoped
    }
}

/// The content of an [`ImageAsset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageData {
    /// Raster image bytes.
    Binary(Vec<u8>),
    /// Vector markup (SVG), kept as text.
    Text(String),
}

impl ImageData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Binary(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An image declared by the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
    pub(crate) idref: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) media_type: String,
    pub(crate) data: ImageData,
}

impl ImageAsset {
    pub fn idref(&self) -> &str {
        &self.idref
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }
}
