// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Namespaces
pub(crate) const DC_NAMESPACE: &[u8] = b"http://purl.org/dc/elements/1.1/";
pub(crate) const XHTML_NAMESPACE: &[u8] = b"http://www.w3.org/1999/xhtml";

// General attributes
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";

// Container attributes
pub(crate) const FULL_PATH: &str = "full-path";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";

// Spine attributes
pub(crate) const TOC: &str = "toc";
pub(crate) const IDREF: &str = "idref";

// NCX attributes and values
pub(crate) const PLAY_ORDER: &str = "playOrder";
pub(crate) const DTB_DEPTH: &str = "dtb:depth";

// Dublin Core element local names
pub(crate) const DC_TITLE: &str = "title";
pub(crate) const DC_CREATOR: &str = "creator";
pub(crate) const DC_SUBJECT: &str = "subject";
pub(crate) const DC_RIGHTS: &str = "rights";
pub(crate) const DC_LANGUAGE: &str = "language";
pub(crate) const DC_PUBLISHER: &str = "publisher";
pub(crate) const DC_IDENTIFIER: &str = "identifier";

// Media types
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const CSS_TYPE: &str = "text/css";
pub(crate) const SVG_TYPE: &str = "image/svg+xml";
pub(crate) const IMAGE_TYPE_MARKER: &str = "image";

// constants where calling str.as_bytes() is not possible
pub(crate) mod bytes {
    pub(crate) const ROOT_FILE: &[u8] = b"rootfile";
    pub(crate) const MANIFEST: &[u8] = b"manifest";
    pub(crate) const SPINE: &[u8] = b"spine";
    pub(crate) const PACKAGE: &[u8] = b"package";

    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";

    pub(crate) const HEAD: &[u8] = b"head";
    pub(crate) const META: &[u8] = b"meta";
    pub(crate) const DOC_TITLE: &[u8] = b"docTitle";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint"; // NCX
    pub(crate) const NAV_TARGET: &[u8] = b"navTarget"; // NCX
    pub(crate) const NAV_LABEL: &[u8] = b"navLabel";
    pub(crate) const CONTENT: &[u8] = b"content";
}
