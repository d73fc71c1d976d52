use crate::epub::util::{self, Book};
use epub_ingest::epub::toc::{NavNode, NavNodeKind};

fn titles<'a>(nodes: impl IntoIterator<Item = &'a NavNode>) -> Vec<&'a str> {
    nodes.into_iter().map(NavNode::title).collect()
}

#[test]
fn test_depth_counts() {
    let document = Book::sample().ingest();
    let toc = document.toc();

    let depth_1 = toc.nodes_at_depth(1).len();
    let depth_2 = toc.nodes_at_depth(2).len();
    let depth_3 = toc.nodes_at_depth(3).len();

    assert_eq!((3, 4, 5), (depth_1, depth_2, depth_3));
    assert!(depth_3 > depth_2 && depth_2 > depth_1);
    assert!(toc.nodes_at_depth(4).is_empty());
    assert_eq!(depth_1 + depth_2, toc.nodes_within_depth(2).len());
    assert_eq!(Some(3), toc.declared_depth());
}

#[test]
fn test_top_level_order() {
    let document = Book::sample().ingest();
    let toc = document.toc();

    assert_eq!(
        vec!["Chapter 1", "Chapter 2", "Pride and Prejudice"],
        titles(toc.top_level())
    );
    assert_eq!(
        toc.points().next().map(NavNode::title),
        toc.top_level().next().map(NavNode::title)
    );
    assert_eq!(Some("Pride and Prejudice (NCX)"), toc.doc_title());
}

#[test]
fn test_children_and_parents() {
    let document = Book::sample().ingest();
    let toc = document.toc();
    let chapter_1 = toc.top_level().next().unwrap();

    let sections = toc.children(chapter_1);
    assert_eq!(vec!["Section 1.1", "Section 1.2"], titles(sections.iter().copied()));
    assert_eq!(vec!["1.1.a", "1.1.b"], titles(toc.children(sections[0])));

    let leaf = toc.children(sections[0])[1];
    assert_eq!(3, leaf.depth());
    assert_eq!(4, leaf.play_order());
    assert_eq!("text/chapter%201.xhtml#b", leaf.href());
    assert_eq!(Some("b"), leaf.fragment());
    assert_eq!(util::CHAPTER_1, leaf.path());
    assert_eq!(Some("Section 1.1"), toc.parent(leaf.id()).map(NavNode::title));
    assert_eq!(None, toc.parent(chapter_1.id()));
}

#[test]
fn test_nav_targets() {
    let document = Book::sample().ingest();
    let toc = document.toc();
    let targets: Vec<_> = toc.targets().collect();

    assert_eq!(vec!["Figure 1"], titles(targets.iter().copied()));
    assert_eq!(NavNodeKind::Target, targets[0].kind());
    assert_eq!(1, targets[0].depth());
    assert_eq!(13, targets[0].play_order());
    // Targets are not part of the top level
    assert!(toc.top_level().all(|node| node.kind() == NavNodeKind::Point));
    assert_eq!(13, toc.len());
}

#[test]
fn test_title_fallback_to_doc_title() {
    let book = Book::sample().edit(util::OPF_PATH, |opf| {
        opf.replace("<dc:title>Pride and Prejudice</dc:title>", "")
    });
    let document = book.ingest();

    assert_eq!(
        Some("Pride and Prejudice (NCX)"),
        document.toc().top_level().last().map(NavNode::title)
    );
    assert_eq!("Pride and Prejudice (NCX)", document.chapters()[2].title());
}

#[test]
fn test_play_order_fallback() {
    let book = Book::sample().edit(util::NCX_PATH, |ncx| {
        ncx.replace(r#" playOrder="7""#, "")
    });
    let document = book.ingest();

    // Without `playOrder`, the position in document order is used
    assert_eq!(7, document.chapters()[1].order());
}

#[test]
fn test_zero_play_order_fallback() {
    let book = Book::sample().edit(util::NCX_PATH, |ncx| {
        ncx.replace(r#"playOrder="7""#, r#"playOrder="0""#)
    });
    let document = book.ingest();

    assert_eq!(7, document.chapters()[1].order());
    assert!(document.chapters().iter().all(|chapter| chapter.order() > 0));
}
