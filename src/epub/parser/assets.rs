use crate::epub::asset::{ImageAsset, ImageData, StylesheetAsset};
use crate::epub::manifest::Manifest;
use crate::epub::parser::EpubParser;
use crate::errors::IngestResult;
use crate::render::css::CssScoper;
use crate::util::utf;

impl EpubParser<'_> {
    /// Extracts and scopes every stylesheet declared by the manifest,
    /// whether or not the spine references it.
    pub(super) fn extract_stylesheets(&self, manifest: &Manifest) -> IngestResult<Vec<StylesheetAsset>> {
        let scoper = CssScoper::new(self.options);

        manifest
            .stylesheets()
            .map(|item| {
                let raw = utf::into_utf8_lossy(&self.read_binary(item.path())?);
                log::debug!("Adding stylesheet `{}`", item.path());

                Ok(StylesheetAsset {
                    idref: item.id().to_owned(),
                    href: item.href().to_owned(),
                    path: item.path().to_owned(),
                    scoped: scoper.scope(&raw),
                    raw,
                })
            })
            .collect()
    }

    /// Extracts every image declared by the manifest.
    ///
    /// SVG images are kept as text; everything else as raw bytes.
    pub(super) fn extract_images(&self, manifest: &Manifest) -> IngestResult<Vec<ImageAsset>> {
        manifest
            .images()
            .map(|item| {
                let bytes = self.read_binary(item.path())?;
                let data = if item.is_svg() {
                    log::debug!("Adding image `{}` as SVG text", item.path());
                    ImageData::Text(utf::into_utf8_lossy(&bytes))
                } else {
                    log::debug!("Adding image `{}`", item.path());
                    ImageData::Binary(bytes)
                };

                Ok(ImageAsset {
                    idref: item.id().to_owned(),
                    href: item.href().to_owned(),
                    path: item.path().to_owned(),
                    media_type: item.media_type().to_owned(),
                    data,
                })
            })
            .collect()
    }
}
