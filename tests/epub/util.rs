use epub_ingest::{EpubDocument, IngestOptions};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const OPF_PATH: &str = "OEBPS/content.opf";
pub const NCX_PATH: &str = "OEBPS/toc.ncx";
pub const CHAPTER_1: &str = "OEBPS/text/chapter 1.xhtml";
pub const CHAPTER_2: &str = "OEBPS/text/chapter2.xhtml";
pub const CHAPTER_3: &str = "OEBPS/text/chapter3.xhtml";

const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="{opf}" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

const SAMPLE_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>Pride and Prejudice</dc:title>
    <dc:creator opf:role="aut">
      Jane Austen
    </dc:creator>
    <dc:creator opf:role="edt">Anonymous Editor</dc:creator>
    <dc:subject>Fiction</dc:subject>
    <dc:subject>Romance</dc:subject>
    <dc:language>en</dc:language>
    <dc:rights>Public domain</dc:rights>
    <dc:identifier id="uid">urn:uuid:3f1c2a6e-0000-4000-8000-000000000001</dc:identifier>
    <meta name="cover" content="logo"/>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="cover" href="text/cover.xhtml" media-type="application/xhtml+xml"/>
    <item id="c1" href="text/chapter%201.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/chapter2.xhtml" media-type="application/xhtml+xml"/>
    <item id="c3" href="text/chapter3.xhtml" media-type="application/xhtml+xml"/>
    <item id="css" href="styles/book.css" media-type="text/css"/>
    <item id="logo" href="images/logo.png" media-type="image/png"/>
    <item id="map" href="images/map.svg" media-type="image/svg+xml"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="cover"/>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
    <itemref idref="c3"/>
  </spine>
</package>"#;

const SAMPLE_NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:3f1c2a6e-0000-4000-8000-000000000001"/>
    <meta name="dtb:depth" content="3"/>
  </head>
  <docTitle><text>Pride and Prejudice (NCX)</text></docTitle>
  <navMap>
    <navPoint id="p1" playOrder="1">
      <navLabel><text>Chapter 1</text></navLabel>
      <content src="text/chapter%201.xhtml"/>
      <navPoint id="p2" playOrder="2">
        <navLabel><text>Section 1.1</text></navLabel>
        <content src="text/chapter%201.xhtml#s1"/>
        <navPoint id="p3" playOrder="3">
          <navLabel><text>1.1.a</text></navLabel>
          <content src="text/chapter%201.xhtml#a"/>
        </navPoint>
        <navPoint id="p4" playOrder="4">
          <navLabel><text>1.1.b</text></navLabel>
          <content src="text/chapter%201.xhtml#b"/>
        </navPoint>
      </navPoint>
      <navPoint id="p5" playOrder="5">
        <navLabel><text>Section 1.2</text></navLabel>
        <content src="text/chapter%201.xhtml#s2"/>
        <navPoint id="p6" playOrder="6">
          <navLabel><text>1.2.a</text></navLabel>
          <content src="text/chapter%201.xhtml#c"/>
        </navPoint>
      </navPoint>
    </navPoint>
    <navPoint id="p7" playOrder="7">
      <navLabel><text>Chapter 2</text></navLabel>
      <content src="text/chapter2.xhtml"/>
      <navPoint id="p8" playOrder="8">
        <navLabel><text>Section 2.1</text></navLabel>
        <content src="text/chapter2.xhtml#s1"/>
        <navPoint id="p9" playOrder="9">
          <navLabel><text>2.1.a</text></navLabel>
          <content src="text/chapter2.xhtml#a"/>
        </navPoint>
      </navPoint>
      <navPoint id="p10" playOrder="10">
        <navLabel><text>Section 2.2</text></navLabel>
        <content src="text/chapter2.xhtml#s2"/>
        <navPoint id="p11" playOrder="11">
          <navLabel><text>2.2.a</text></navLabel>
          <content src="text/chapter2.xhtml#b"/>
        </navPoint>
      </navPoint>
    </navPoint>
    <navPoint id="p12" playOrder="12">
      <content src="text/chapter3.xhtml"/>
    </navPoint>
  </navMap>
  <navList>
    <navLabel><text>Figures</text></navLabel>
    <navTarget id="t1" playOrder="13">
      <navLabel><text>Figure 1</text></navLabel>
      <content src="text/chapter3.xhtml#fig"/>
    </navTarget>
  </navList>
</ncx>"#;

const COVER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>Cover</title></head>
<body><img src="../images/logo.png" alt="Cover"/></body></html>"#;

pub const CHAPTER_1_XHTML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>Chapter 1</title>
  <link rel="stylesheet" href="../styles/book.css" type="text/css"/>
</head>
<body class="chapter">
<h1 id="s1">Chapter&nbsp;1</h1>
<p>It is a truth universally acknowledged&mdash;</p>
<p><img src="../images/map.svg" alt="Map of Hertfordshire"/></p>
</body>
</html>"#;

pub const CHAPTER_2_XHTML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>Chapter 2</title></head>
<body><h1>Chapter 2</h1><p>Mr. Bennet was among the earliest&hellip;</p></body></html>"#;

/// Not well-formed: `<b>` is never closed.
pub const CHAPTER_3_XHTML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>Chapter 3</title></head>
<body><h1>Chapter 3</h1><p>Unclosed <b>bold</p></body></html>"#;

pub const STYLESHEET: &str = "body { margin: 0; }\nh1 { color: red; }\n@page { margin: 1em; }";

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

pub const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;

/// An EPUB assembled in memory.
#[derive(Clone, Default)]
pub struct Book {
    files: Vec<(String, Vec<u8>)>,
}

impl Book {
    /// A package within `OEBPS/` with a three-level navigation tree:
    /// - A cover page without a navigation entry.
    /// - `chapter 1.xhtml` with an SVG image and HTML entities.
    /// - `chapter2.xhtml`.
    /// - `chapter3.xhtml` which is not well-formed and has no navigation label.
    pub fn sample() -> Self {
        Self::default()
            .with_file("META-INF/container.xml", CONTAINER.replace("{opf}", OPF_PATH))
            .with_file(OPF_PATH, SAMPLE_OPF)
            .with_file(NCX_PATH, SAMPLE_NCX)
            .with_file("OEBPS/text/cover.xhtml", COVER)
            .with_file(CHAPTER_1, CHAPTER_1_XHTML)
            .with_file(CHAPTER_2, CHAPTER_2_XHTML)
            .with_file(CHAPTER_3, CHAPTER_3_XHTML)
            .with_file("OEBPS/styles/book.css", STYLESHEET)
            .with_file("OEBPS/images/logo.png", PNG)
            .with_file("OEBPS/images/map.svg", SVG)
    }

    /// A package at the archive root with one chapter per title and a flat
    /// navigation map, play orders `1..=N`.
    pub fn flat(titles: &[&str]) -> Self {
        let mut items = String::new();
        let mut itemrefs = String::new();
        let mut nav_points = String::new();
        let mut book = Self::default();

        for (index, title) in titles.iter().enumerate() {
            let order = index + 1;
            items.push_str(&format!(
                r#"<item id="ch{order}" href="ch{order}.xhtml" media-type="application/xhtml+xml"/>"#
            ));
            itemrefs.push_str(&format!(r#"<itemref idref="ch{order}"/>"#));
            nav_points.push_str(&format!(
                r#"<navPoint id="n{order}" playOrder="{order}"><navLabel><text>{title}</text></navLabel><content src="ch{order}.xhtml"/></navPoint>"#
            ));
            book = book.with_file(
                &format!("ch{order}.xhtml"),
                format!(
                    r#"<html xmlns="http://www.w3.org/1999/xhtml"><body><h1>{title}</h1></body></html>"#
                ),
            );
        }

        let opf = format!(
            r#"<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Flat</dc:title></metadata>
  <manifest><item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>{items}</manifest>
  <spine toc="ncx">{itemrefs}</spine>
</package>"#
        );
        let ncx = format!(
            r#"<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/"><navMap>{nav_points}</navMap></ncx>"#
        );

        book.with_file("META-INF/container.xml", CONTAINER.replace("{opf}", "content.opf"))
            .with_file("content.opf", opf)
            .with_file("toc.ncx", ncx)
    }

    /// Adds or replaces the file at `path`.
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();

        match self.files.iter_mut().find(|(name, _)| name == path) {
            Some((_, existing)) => *existing = content,
            None => self.files.push((path.to_owned(), content)),
        }
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        self.files.retain(|(name, _)| name != path);
        self
    }

    /// Rewrites the text of the file at `path`.
    pub fn edit(self, path: &str, edit: impl FnOnce(&str) -> String) -> Self {
        let content = self
            .files
            .iter()
            .find(|(name, _)| name == path)
            .map(|(_, content)| String::from_utf8(content.clone()).unwrap())
            .unwrap_or_else(|| panic!("no file at `{path}`"));

        self.with_file(path, edit(&content))
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (name, content) in &self.files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn ingest(&self) -> EpubDocument {
        epub_ingest::ingest(&self.bytes()).unwrap()
    }

    pub fn ingest_with(&self, options: &IngestOptions) -> EpubDocument {
        EpubDocument::ingest_with(&self.bytes(), options).unwrap()
    }
}
