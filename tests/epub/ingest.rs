use crate::epub::util::{self, Book};
use epub_ingest::epub::asset::ImageData;
use epub_ingest::epub::errors::{ContainerFault, EpubError};
use epub_ingest::epub::metadata::MetadataValue;
use epub_ingest::errors::IngestError;
use epub_ingest::{EpubDocument, IngestOptions};

fn ingest_error(book: &Book) -> IngestError {
    epub_ingest::ingest(&book.bytes()).unwrap_err()
}

#[test]
fn test_metadata() {
    let document = Book::sample().ingest();
    let metadata = document.metadata();

    assert_eq!(Some("Pride and Prejudice"), metadata.title());
    assert_eq!(vec!["Jane Austen", "Anonymous Editor"], metadata.authors());
    assert_eq!(Some("Jane Austen...".to_owned()), metadata.author_display());
    assert_eq!(
        MetadataValue::Multiple(vec!["Fiction", "Romance"]),
        metadata.subjects()
    );
    assert_eq!(MetadataValue::Single("en"), metadata.language());
    assert_eq!(Some("Public domain"), metadata.rights().as_single());
    assert_eq!(MetadataValue::Empty, metadata.publisher());
    assert_eq!(
        Some("urn:uuid:3f1c2a6e-0000-4000-8000-000000000001"),
        metadata.identifier().first()
    );
    assert_eq!(metadata.subjects(), metadata.get("subject"));
}

#[test]
fn test_package_locations() {
    let document = Book::sample().ingest();

    assert_eq!(util::OPF_PATH, document.package_path());
    assert_eq!("OEBPS/", document.base_path());
    assert!(document.opf_source().contains("<spine toc=\"ncx\">"));
    assert!(document.toc_source().contains("<navMap>"));
    assert_eq!(Some("ncx"), document.spine().toc_id());

    let item = document.manifest().by_id("c1").unwrap();
    assert_eq!("text/chapter%201.xhtml", item.href());
    assert_eq!(util::CHAPTER_1, item.path());
    assert_eq!(Some(item), document.manifest().by_href(util::CHAPTER_1));
}

#[test]
fn test_chapters_follow_spine_and_nav() {
    let document = Book::sample().ingest();
    let chapters = document.chapters();

    // The cover page has no navigation entry and is excluded
    let idrefs: Vec<_> = chapters.iter().map(|chapter| chapter.idref()).collect();
    assert_eq!(vec!["c1", "c2", "c3"], idrefs);

    let orders: Vec<_> = chapters.iter().map(|chapter| chapter.order()).collect();
    assert_eq!(vec![1, 7, 12], orders);

    // Nested entries pointing to the same file do not override the first entry
    assert_eq!("Chapter 1", chapters[0].title());
    assert_eq!("Chapter 2", chapters[1].title());
    // Without a label, the package title is used
    assert_eq!("Pride and Prejudice", chapters[2].title());

    assert_eq!(util::CHAPTER_1_XHTML.as_bytes(), chapters[0].content());
    assert!(chapters.iter().all(|chapter| !chapter.is_rendered()));
}

#[test]
fn test_flat_chapters_ordered() {
    let titles = ["One", "Two", "Three", "Four", "Five"];
    let document = Book::flat(&titles).ingest();
    let chapters = document.chapters();

    assert_eq!("", document.base_path());
    assert_eq!(titles.len(), chapters.len());

    for (index, chapter) in chapters.iter().enumerate() {
        assert_eq!(index as u32 + 1, chapter.order());
        assert_eq!(titles[index], chapter.title());
    }
    assert!(chapters.windows(2).all(|pair| pair[0].order() < pair[1].order()));
}

#[test]
fn test_reingest_identical() {
    let bytes = Book::sample().bytes();
    let a = epub_ingest::ingest(&bytes).unwrap();
    let b = epub_ingest::ingest(&bytes).unwrap();

    assert_eq!(a.metadata(), b.metadata());
    assert_eq!(a.chapters(), b.chapters());
    assert_eq!(a.toc(), b.toc());
    assert_eq!(a.stylesheets(), b.stylesheets());
    assert_eq!(a.images(), b.images());
}

#[test]
fn test_ingest_reader() {
    let bytes = Book::sample().bytes();
    let document =
        EpubDocument::ingest_reader(std::io::Cursor::new(bytes), &IngestOptions::default())
            .unwrap();

    assert_eq!(3, document.chapters().len());
}

#[test]
fn test_stylesheets_scoped() {
    let document = Book::sample().ingest();
    let stylesheet = document.stylesheet_by_href("styles/book.css").unwrap();

    assert!(document.has_stylesheets());
    assert_eq!(util::STYLESHEET, stylesheet.raw());
    assert_eq!(
        "#bw-book-content div { margin: 0; }\n#bw-book-content h1 { color: red; }\n@page { margin: 1em; }",
        stylesheet.css()
    );
    assert_eq!(2, stylesheet.scoping().report.applied().count());
    assert_eq!(1, stylesheet.scoping().report.skipped().count());
}

#[test]
fn test_stylesheet_charset_kept() {
    let css = "@charset \"utf-8\";\nbody { margin: 0; }";
    let document = Book::sample()
        .with_file("OEBPS/styles/book.css", css)
        .ingest();
    let stylesheet = document.stylesheet_by_href("styles/book.css").unwrap();

    assert_eq!(
        "@charset \"utf-8\";\n#bw-book-content div { margin: 0; }",
        stylesheet.css()
    );
    let skipped: Vec<_> = stylesheet
        .scoping()
        .report
        .skipped()
        .map(|entry| entry.subject())
        .collect();
    assert_eq!(vec!["@charset"], skipped);
}

#[test]
fn test_images_extracted() {
    let document = Book::sample().ingest();
    let images = document.images();

    assert_eq!(2, images.len());

    let png = document.image_by_href("images/logo.png").unwrap();
    assert_eq!("image/png", png.media_type());
    assert_eq!(&ImageData::Binary(util::PNG.to_vec()), png.data());

    // Vector images are kept as text
    let svg = document.image_by_href("OEBPS/images/map.svg").unwrap();
    assert_eq!(Some(util::SVG), svg.data().as_text());
}

#[test]
fn test_chapter_navigation() {
    let document = Book::sample().ingest();
    let second = document.chapter_by_href("text/chapter2.xhtml#s1").unwrap();

    assert_eq!("c2", second.idref());
    assert_eq!(
        Some("c1"),
        document.previous_chapter(second).map(|chapter| chapter.idref())
    );
    assert_eq!(
        Some("c3"),
        document.next_chapter(second).map(|chapter| chapter.idref())
    );

    let first = &document.chapters()[0];
    assert_eq!(None, document.previous_chapter(first));
    assert_eq!(Some(first), document.chapter_by_href(util::CHAPTER_1));
    assert_eq!(None, document.chapter_by_href("text/cover.xhtml"));
}

#[test]
fn test_safe_names() {
    let document = Book::sample().ingest();

    assert_eq!(Some("Pride+and+Prejudice".to_owned()), document.safe_title());
    assert_eq!(Some("Jane+Austen".to_owned()), document.safe_author());
}

#[test]
fn test_missing_container_descriptor() {
    let error = ingest_error(&Book::sample().without_file("META-INF/container.xml"));

    assert!(error.is_malformed_container());
    assert!(matches!(
        error.as_epub_error(),
        Some(EpubError::MalformedContainer(ContainerFault::MissingDescriptor(_)))
    ));
}

#[test]
fn test_not_a_zip() {
    let error = epub_ingest::ingest(b"PK definitely not a zip").unwrap_err();

    assert!(matches!(
        error.as_epub_error(),
        Some(EpubError::MalformedContainer(ContainerFault::UnreadableArchive(_)))
    ));
}

#[test]
fn test_malformed_container_descriptor() {
    #[rustfmt::skip]
    let cases = [
        (r#"<container><rootfiles></rootfiles></container>"#, "rootfile"),
        (r#"<container><rootfiles><rootfile full-path=""/></rootfiles></container>"#, "rootfile"),
        (r#"<container><rootfiles></container><rootfile full-path="a.opf"/>"#, "unparsable"),
    ];

    for (descriptor, kind) in cases {
        let book = Book::sample().with_file("META-INF/container.xml", descriptor);
        let error = ingest_error(&book);

        match (kind, error.as_epub_error()) {
            ("rootfile", Some(EpubError::MalformedContainer(ContainerFault::MissingRootFile))) => {}
            (
                "unparsable",
                Some(EpubError::MalformedContainer(ContainerFault::UnparsableDescriptor(_))),
            ) => {}
            _ => panic!("unexpected error for `{descriptor}`: {error:?}"),
        }
    }
}

#[test]
fn test_toc_resolution() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| {
        opf.replace(r#"<spine toc="ncx">"#, r#"<spine toc="missing">"#)
    });

    assert!(matches!(
        ingest_error(&book).as_epub_error(),
        Some(EpubError::TocResolution(id)) if id == "missing"
    ));
}

#[test]
fn test_toc_fallback_without_attribute() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| {
        opf.replace(r#"<spine toc="ncx">"#, "<spine>")
    });

    assert_eq!(3, book.ingest().chapters().len());
}

#[test]
fn test_missing_chapter_aborts() {
    let error = ingest_error(&Book::sample().without_file(util::CHAPTER_2));

    assert!(matches!(
        error,
        IngestError::AssetRead { ref path, .. } if path == util::CHAPTER_2
    ));
}

#[test]
fn test_missing_package_document_aborts() {
    let error = ingest_error(&Book::sample().without_file(util::OPF_PATH));

    assert!(matches!(
        error,
        IngestError::AssetRead { ref path, .. } if path == util::OPF_PATH
    ));
}

#[test]
fn test_missing_image_aborts() {
    let error = ingest_error(&Book::sample().without_file("OEBPS/images/logo.png"));

    assert!(matches!(error, IngestError::AssetRead { .. }));
}

#[test]
fn test_missing_package_elements() {
    #[rustfmt::skip]
    let cases: [(&str, fn(&EpubError) -> bool); 2] = [
        ("manifest", |error| matches!(error, EpubError::NoManifestFound)),
        ("spine", |error| matches!(error, EpubError::NoSpineFound)),
    ];

    for (element, is_expected) in cases {
        let book = Book::sample().edit(util::OPF_PATH, |opf| {
            opf.replace(&format!("<{element}"), &format!("<x{element}"))
                .replace(&format!("</{element}>"), &format!("</x{element}>"))
        });
        let error = ingest_error(&book);

        assert!(error.as_epub_error().is_some_and(is_expected), "{element}: {error:?}");
    }
}

#[test]
fn test_missing_title() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| {
        opf.replace("<dc:title>Pride and Prejudice</dc:title>", "")
    });

    // Accepted unless strict
    let document = book.ingest();
    assert_eq!(None, document.metadata().title());
    assert_eq!(None, document.safe_title());

    let error = EpubDocument::ingest_with(&book.bytes(), &IngestOptions::new().strict(true))
        .unwrap_err();
    assert!(matches!(error.as_epub_error(), Some(EpubError::MissingTitle)));
}

#[test]
fn test_duplicate_manifest_ids() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| {
        opf.replace(
            r#"<item id="css""#,
            r#"<item id="c1" href="text/duplicate.xhtml" media-type="application/xhtml+xml"/><item id="css""#,
        )
    });

    // The first item wins unless strict
    let document = book.ingest();
    assert_eq!(
        util::CHAPTER_1,
        document.manifest().by_id("c1").unwrap().path()
    );

    let error = EpubDocument::ingest_with(&book.bytes(), &IngestOptions::new().strict(true))
        .unwrap_err();
    assert!(matches!(
        error.as_epub_error(),
        Some(EpubError::DuplicateItemId(id)) if id == "c1"
    ));
}

#[test]
fn test_unparsable_package() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| opf.replace("</manifest>", ""));

    assert!(matches!(ingest_error(&book), IngestError::Format(_)));
}
