//! Chapter markup sanitization.

use crate::epub::IngestOptions;
use crate::epub::consts;
use crate::render::dom::Dom;
use crate::render::entities::EntityTable;
use crate::render::report::{RewriteOutcome, RewriteReport};
use crate::util::str::StrExt;
use crate::util::uri;
use crate::util::utf;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use std::io;
use std::str::Utf8Error;

const BODY: &str = "body";
const CONTAINER: &str = "div";
const IMG: &str = "img";
const SVG_EXTENSION: &str = ".svg";
const SVG_LINK_CLASS: &str = "svg";
const SVG_LINK_TEXT: &str = "[ View linked image in SVG format ]";

/// Chapter markup could not be sanitized.
///
/// This failure is local: the raw markup is used in place of the sanitized result.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum SanitizationFailure {
    /// The markup is not well-formed XML.
    #[error("markup is not well-formed: {0}")]
    Malformed(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("malformed entity usage: {0}")]
    Escape(#[from] EscapeError),

    /// An entity reference is neither predefined nor within the [`EntityTable`].
    #[error("unknown entity reference: `&{0};`")]
    UnknownEntity(String),

    #[error("markup is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// The document ends while an element is still open.
    #[error("unclosed element at end of markup: `{0}`")]
    UnclosedElement(String),

    #[error("markup has no `body` element")]
    MissingBody,

    #[error("sanitized markup cannot be serialized: {0}")]
    Serialize(#[from] io::Error),
}

/// The result of [`XhtmlSanitizer::sanitize`].
#[derive(Debug)]
pub struct Sanitized {
    /// The sanitized markup, or the raw markup (decoded lossily)
    /// when [`Self::failure`] is set.
    pub content: String,
    /// One entry per SVG image reference encountered.
    pub report: RewriteReport,
    pub failure: Option<SanitizationFailure>,
}

impl Sanitized {
    pub fn is_sanitized(&self) -> bool {
        self.failure.is_none()
    }
}

/// Transforms raw chapter markup into a display-safe fragment.
///
/// 1. The markup is parsed as XML with the configured [`EntityTable`],
///    so named HTML entities such as `&nbsp;` are accepted.
/// 2. The XHTML namespace is stripped from every element name.
/// 3. Every `<img>` referencing an SVG image is replaced with a link to it,
///    as many renderers cannot inline SVG.
/// 4. The children of `<body>` are moved into a `<div>` carrying the configured
///    container id, discarding the `<body>` wrapper.
///
/// Sanitization is a pure function of its input.
///
/// # Examples
/// ```
/// use epub_ingest::IngestOptions;
/// use epub_ingest::render::XhtmlSanitizer;
///
/// let sanitizer = XhtmlSanitizer::new(&IngestOptions::default());
/// let sanitized = sanitizer.sanitize(
///     br#"<html xmlns="http://www.w3.org/1999/xhtml"><body><p>A&nbsp;B</p></body></html>"#,
/// );
///
/// assert!(sanitized.is_sanitized());
/// assert_eq!(
///     "<div id=\"bw-book-content\"><p>A\u{a0}B</p></div>",
///     sanitized.content,
/// );
/// ```
#[derive(Clone, Debug)]
pub struct XhtmlSanitizer {
    entities: EntityTable,
    container_id: String,
}

impl XhtmlSanitizer {
    pub fn new(options: &IngestOptions) -> Self {
        Self {
            entities: options.entities.clone(),
            container_id: options.container_id.clone(),
        }
    }

    /// Sanitizes `raw` chapter markup.
    ///
    /// On failure, [`Sanitized::content`] holds `raw` unprocessed.
    pub fn sanitize(&self, raw: &[u8]) -> Sanitized {
        let mut report = RewriteReport::default();

        match self.try_sanitize(raw, &mut report) {
            Ok(content) => Sanitized {
                content,
                report,
                failure: None,
            },
            Err(failure) => {
                log::error!("Was not valid XHTML; treating as unprocessed markup: {failure}");

                Sanitized {
                    content: utf::into_utf8_lossy(raw),
                    report,
                    failure: Some(failure),
                }
            }
        }
    }

    fn try_sanitize(
        &self,
        raw: &[u8],
        report: &mut RewriteReport,
    ) -> Result<String, SanitizationFailure> {
        let mut dom = Dom::parse(raw, &self.entities)?;
        link_svg_images(&mut dom, report);

        let body = dom
            .elements_named(BODY)
            .next()
            .ok_or(SanitizationFailure::MissingBody)?;
        let container = dom.create_element(CONTAINER, &[(consts::ID, self.container_id.as_str())]);

        for child in dom.children(body).to_vec() {
            dom.push_child(container, child);
        }
        Ok(dom.serialize(container)?)
    }
}

/// Replaces each SVG `<img>` in place with an anchor linking to the image.
fn link_svg_images(dom: &mut Dom, report: &mut RewriteReport) {
    let images: Vec<_> = dom
        .elements_named(IMG)
        .filter_map(|id| dom.attribute(id, consts::SRC).map(|src| (id, src.to_owned())))
        .filter(|(_, src)| uri::split_fragment(src).0.ends_with_ignore_case(SVG_EXTENSION))
        .collect();

    if images.is_empty() {
        return;
    }
    let parents = dom.parent_index();

    for (image, src) in images {
        let Some(parent) = parents[image.index()] else {
            log::error!("Cannot link SVG image `{src}`: the element has no parent");
            report.record(src, RewriteOutcome::Skipped("element has no parent".to_owned()));
            continue;
        };

        log::debug!("Translating SVG image `{src}`");
        let anchor = dom.create_element("a", &[("class", SVG_LINK_CLASS), (consts::HREF, src.as_str())]);
        let text = dom.create_text(SVG_LINK_TEXT);
        dom.push_child(anchor, text);

        if dom.replace_child(parent, image, anchor) {
            report.record(src, RewriteOutcome::Applied);
        } else {
            report.record(src, RewriteOutcome::Skipped("element was detached".to_owned()));
        }
    }
}
