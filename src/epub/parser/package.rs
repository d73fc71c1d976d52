use crate::epub::consts::{self, bytes};
use crate::epub::errors::EpubError;
use crate::epub::manifest::{Manifest, ManifestItem};
use crate::epub::metadata::{DublinCoreEntry, PackageMetadata};
use crate::epub::parser::EpubParser;
use crate::epub::spine::{Spine, SpineEntry};
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::parser::{ParserResult, unparsable};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use std::str;

pub(super) struct PackageContent {
    pub(super) metadata: PackageMetadata,
    pub(super) manifest: Manifest,
    pub(super) spine: Spine,
}

impl EpubParser<'_> {
    /// Parses the `.opf` package document.
    ///
    /// Manifest hrefs are resolved against `base_path` into archive paths.
    pub(super) fn parse_package(&self, base_path: &str, data: &str) -> ParserResult<PackageContent> {
        let mut reader = xml::reader(data.as_bytes());
        let mut package_found = false;
        let mut entries = Vec::new();
        let mut manifest = None;
        let mut spine = None;

        loop {
            let (ns, event) = reader.read_resolved_event().map_err(unparsable)?;
            let is_dublin_core = matches!(ns, ResolveResult::Bound(Namespace(ns)) if ns == consts::DC_NAMESPACE);

            match event {
                Event::Start(el) if is_dublin_core => {
                    let value = reader.get_element_text(&el, &self.options.entities)?;
                    entries.push(dublin_core_entry(&el, value)?);
                }
                Event::Empty(el) if is_dublin_core => {
                    entries.push(dublin_core_entry(&el, String::new())?);
                }
                Event::Start(el) | Event::Empty(el) => match el.local_name().as_ref() {
                    bytes::PACKAGE => package_found = true,
                    bytes::MANIFEST => manifest = Some(Manifest::default()),
                    bytes::SPINE => {
                        spine = Some(Spine {
                            entries: Vec::new(),
                            toc: el.get_attribute(consts::TOC, &self.options.entities)?,
                        });
                    }
                    bytes::ITEM => {
                        if let Some(manifest) = manifest.as_mut() {
                            self.parse_manifest_item(manifest, base_path, &el)?;
                        }
                    }
                    bytes::ITEMREF => {
                        let idref = el.get_attribute(consts::IDREF, &self.options.entities)?;

                        match (spine.as_mut(), idref) {
                            (Some(spine), Some(idref)) => spine.entries.push(SpineEntry { idref }),
                            (Some(_), None) => log::warn!("Skipping spine `itemref` without an `idref`"),
                            _ => {}
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !package_found {
            return Err(EpubError::NoPackageFound.into());
        }
        let manifest = manifest.ok_or(EpubError::NoManifestFound)?;
        let spine = spine.ok_or(EpubError::NoSpineFound)?;
        let metadata = self.validate_metadata(PackageMetadata::new(entries))?;

        log::debug!(
            "Parsed package: {} manifest items, {} spine entries",
            manifest.len(),
            spine.len()
        );
        Ok(PackageContent {
            metadata,
            manifest,
            spine,
        })
    }

    fn parse_manifest_item(
        &self,
        manifest: &mut Manifest,
        base_path: &str,
        el: &BytesStart<'_>,
    ) -> ParserResult<()> {
        let entities = &self.options.entities;
        let (Some(id), Some(href)) = (
            el.get_attribute(consts::ID, entities)?,
            el.get_attribute(consts::HREF, entities)?,
        ) else {
            log::warn!("Skipping manifest `item` without an `id` or `href`");
            return Ok(());
        };
        let href = href.trim().to_owned();
        let item = ManifestItem {
            path: uri::resolve(base_path, &href),
            media_type: el
                .get_attribute(consts::MEDIA_TYPE, entities)?
                .unwrap_or_default(),
            id,
            href,
        };

        match manifest.insert(item) {
            Ok(()) => Ok(()),
            Err(duplicate) if self.options.strict => {
                Err(EpubError::DuplicateItemId(duplicate.id).into())
            }
            Err(duplicate) => {
                log::warn!("Ignoring duplicate manifest item id `{}`", duplicate.id);
                Ok(())
            }
        }
    }

    fn validate_metadata(&self, metadata: PackageMetadata) -> ParserResult<PackageMetadata> {
        match metadata.title() {
            Some(title) => log::info!("Got title as `{title}`"),
            None if self.options.strict => return Err(EpubError::MissingTitle.into()),
            None => log::warn!("Package metadata has no title"),
        }

        let authors = metadata.authors();
        if authors.is_empty() {
            log::warn!("Package metadata has no authors");
        } else {
            log::info!("Got authors as {authors:?}");
        }
        Ok(metadata)
    }
}

fn dublin_core_entry(el: &BytesStart<'_>, value: String) -> ParserResult<DublinCoreEntry> {
    let tag = str::from_utf8(el.local_name().as_ref())
        .map_err(unparsable)?
        .to_owned();

    Ok(DublinCoreEntry { tag, value })
}

/// Resolves the NCX manifest item named by the spine `toc` attribute.
///
/// Without a `toc` attribute, the first NCX item of the manifest is used.
pub(super) fn locate_toc<'m>(
    manifest: &'m Manifest,
    spine: &Spine,
) -> Result<&'m ManifestItem, EpubError> {
    match spine.toc_id() {
        Some(id) => manifest
            .by_id(id)
            .ok_or_else(|| EpubError::TocResolution(id.to_owned())),
        None => {
            log::warn!("Spine has no `toc` attribute; looking for an NCX manifest item");
            manifest
                .iter()
                .find(|item| item.is_ncx())
                .ok_or(EpubError::NoTocReference)
        }
    }
}
