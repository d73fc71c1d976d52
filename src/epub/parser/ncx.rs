use crate::epub::consts::{self, bytes};
use crate::epub::parser::EpubParser;
use crate::epub::toc::{NavNode, NavNodeId, NavNodeKind, NavTree};
use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};

impl EpubParser<'_> {
    /// Parses an NCX document into a [`NavTree`].
    ///
    /// `ncx_dir` is the archive directory of the NCX document, which its
    /// `content` sources are relative to. Nodes without a label are titled with
    /// `fallback_title`, or the NCX `docTitle` when that is absent.
    pub(super) fn parse_ncx(
        &self,
        ncx_dir: &str,
        data: &str,
        fallback_title: Option<&str>,
    ) -> ParserResult<NavTree> {
        let entities = &self.options.entities;
        let mut reader = xml::reader(data.as_bytes());
        let mut tree = NavTree::default();
        let mut stack: Vec<NavNodeId> = Vec::new();
        let mut in_head = false;
        let mut position = 0;

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) => {
                    if let Some(kind) = nav_node_kind(&el) {
                        position += 1;
                        let node = self.create_node(&el, kind, position)?;
                        let id = tree.push(node, stack.last().copied());
                        stack.push(id);
                        continue;
                    }

                    match el.local_name().as_ref() {
                        bytes::HEAD => in_head = true,
                        bytes::META if in_head => self.parse_meta(&mut tree, &el)?,
                        bytes::NAV_LABEL => {
                            let label = reader.get_element_text(&el, entities)?;
                            set_label(&mut tree, stack.last().copied(), label);
                        }
                        bytes::DOC_TITLE if stack.is_empty() => {
                            let title = reader.get_element_text(&el, entities)?;
                            tree.doc_title = Some(title).filter(|title| !title.is_empty());
                        }
                        bytes::CONTENT => self.parse_content(&mut tree, &stack, ncx_dir, &el)?,
                        _ => {}
                    }
                }
                Event::Empty(el) => {
                    if let Some(kind) = nav_node_kind(&el) {
                        position += 1;
                        let node = self.create_node(&el, kind, position)?;
                        tree.push(node, stack.last().copied());
                        continue;
                    }

                    match el.local_name().as_ref() {
                        bytes::META if in_head => self.parse_meta(&mut tree, &el)?,
                        bytes::CONTENT => self.parse_content(&mut tree, &stack, ncx_dir, &el)?,
                        _ => {}
                    }
                }
                Event::End(el) => {
                    let name = el.local_name();
                    if name.as_ref() == bytes::NAV_POINT || name.as_ref() == bytes::NAV_TARGET {
                        stack.pop();
                    } else if name.as_ref() == bytes::HEAD {
                        in_head = false;
                    }
                }
                _ => {}
            }
        }

        let fallback = fallback_title
            .or(tree.doc_title())
            .unwrap_or_default()
            .to_owned();
        for node in &mut tree.nodes {
            if node.title.is_empty() {
                node.title.clone_from(&fallback);
            }
        }

        log::debug!(
            "Parsed navigation tree: {} nodes, {} top-level",
            tree.len(),
            tree.top_level().len()
        );
        Ok(tree)
    }

    fn create_node(
        &self,
        el: &BytesStart<'_>,
        kind: NavNodeKind,
        position: u32,
    ) -> ParserResult<NavNode> {
        let play_order = el
            .get_attribute(consts::PLAY_ORDER, &self.options.entities)?
            .and_then(|order| order.trim().parse().ok())
            // Play orders are positive
            .filter(|&order| order > 0)
            .unwrap_or(position);

        Ok(NavNode::new(kind, play_order))
    }

    /// Handles `<meta name="dtb:depth" content="N"/>`.
    fn parse_meta(&self, tree: &mut NavTree, el: &BytesStart<'_>) -> ParserResult<()> {
        let entities = &self.options.entities;

        if el.get_attribute(consts::NAME, entities)?.as_deref() == Some(consts::DTB_DEPTH) {
            tree.declared_depth = el
                .get_attribute(consts::CONTENT, entities)?
                .and_then(|depth| depth.trim().parse().ok());
        }
        Ok(())
    }

    /// Handles `<content src="..."/>`; the first source of a node wins.
    fn parse_content(
        &self,
        tree: &mut NavTree,
        stack: &[NavNodeId],
        ncx_dir: &str,
        el: &BytesStart<'_>,
    ) -> ParserResult<()> {
        let Some(&current) = stack.last() else {
            return Ok(());
        };
        let Some(src) = el.get_attribute(consts::SRC, &self.options.entities)? else {
            return Ok(());
        };
        let node = tree.node_mut(current);

        if node.href.is_empty() {
            node.path = uri::resolve(ncx_dir, &src);
            node.href = src.trim().to_owned();
        }
        Ok(())
    }
}

fn nav_node_kind(el: &BytesStart<'_>) -> Option<NavNodeKind> {
    match el.local_name().as_ref() {
        bytes::NAV_POINT => Some(NavNodeKind::Point),
        bytes::NAV_TARGET => Some(NavNodeKind::Target),
        _ => None,
    }
}

/// The first label of a node wins.
fn set_label(tree: &mut NavTree, current: Option<NavNodeId>, label: String) {
    if let Some(current) = current {
        let node = tree.node_mut(current);

        if node.title.is_empty() {
            node.title = label;
        }
    }
}
