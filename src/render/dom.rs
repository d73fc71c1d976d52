//! A minimal arena-backed document tree for rewriting chapter markup.
//!
//! Nodes live in a flat table in document order; tree edges are child index
//! lists and parents are derived on demand.

use crate::epub::consts::XHTML_NAMESPACE;
use crate::render::entities::EntityTable;
use crate::render::xhtml::SanitizationFailure;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use std::io;
use std::str;

/// HTML elements that never have content and are serialized self-closed.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeData {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Unescaped character data.
    Text(String),
    CData(String),
    /// Raw comment content.
    Comment(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    data: NodeData,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Dom {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Dom {
    /// Parses well-formed markup.
    ///
    /// Elements in the XHTML namespace are stored by their local name and
    /// `xmlns` declarations binding that namespace are dropped.
    pub(crate) fn parse(data: &[u8], entities: &EntityTable) -> Result<Self, SanitizationFailure> {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().trim_text(false);

        let mut dom = Self::default();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let parent = stack.last().copied();

            match event {
                Event::Start(start) => {
                    let data = element_data(&ns, &start, entities)?;
                    let id = dom.append(parent, data);
                    stack.push(id);
                }
                Event::Empty(start) => {
                    let data = element_data(&ns, &start, entities)?;
                    dom.append(parent, data);
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(text) => {
                    let text = entities.unescape(str::from_utf8(&text)?)?;
                    dom.append_text(parent, &text);
                }
                Event::GeneralRef(reference) => {
                    let name = str::from_utf8(&reference)?;
                    let resolved = entities
                        .resolve(name)
                        .ok_or_else(|| SanitizationFailure::UnknownEntity(name.to_owned()))?;
                    dom.append_text(parent, &resolved);
                }
                Event::CData(cdata) => {
                    let data = NodeData::CData(str::from_utf8(&cdata)?.to_owned());
                    dom.append(parent, data);
                }
                Event::Comment(comment) => {
                    let data = NodeData::Comment(str::from_utf8(&comment)?.to_owned());
                    dom.append(parent, data);
                }
                Event::Eof => break,
                // Declarations, doctypes and processing instructions are not kept
                _ => {}
            }
        }

        match stack.last() {
            Some(&unclosed) => Err(SanitizationFailure::UnclosedElement(
                dom.name(unclosed).unwrap_or_default().to_owned(),
            )),
            None => Ok(dom),
        }
    }

    fn append(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = self.create(data);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Appends text to `parent`, merging with a trailing text node.
    fn append_text(&mut self, parent: Option<NodeId>, text: &str) {
        let last = match parent {
            Some(parent) => self.nodes[parent.0].children.last(),
            None => self.roots.last(),
        }
        .copied();

        if let Some(NodeData::Text(existing)) = last.map(|last| &mut self.nodes[last.0].data) {
            existing.push_str(text);
        } else {
            self.append(parent, NodeData::Text(text.to_owned()));
        }
    }

    /// Creates a detached node.
    pub(crate) fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            children: Vec::new(),
        });
        id
    }

    pub(crate) fn create_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        self.create(NodeData::Element {
            name: name.to_owned(),
            attributes: attributes
                .iter()
                .map(|&(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        })
    }

    pub(crate) fn create_text(&mut self, text: &str) -> NodeId {
        self.create(NodeData::Text(text.to_owned()))
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Replaces `old` within the children of `parent`, keeping its position.
    ///
    /// Returns `false` if `old` is not a child of `parent`.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> bool {
        let children = &mut self.nodes[parent.0].children;

        match children.iter().position(|&child| child == old) {
            Some(index) => {
                children[index] = new;
                true
            }
            None => false,
        }
    }

    pub(crate) fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub(crate) fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Every element named `name` reachable from the top level, in document order.
    pub(crate) fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants()
            .into_iter()
            .filter(move |&id| self.name(id) == Some(name))
    }

    /// Every attached node in document order.
    fn descendants(&self) -> Vec<NodeId> {
        let mut ordered = Vec::with_capacity(self.nodes.len());
        let mut pending: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = pending.pop() {
            ordered.push(id);
            pending.extend(self.nodes[id.0].children.iter().rev());
        }
        ordered
    }

    /// Maps every child to its parent in one scan over the table.
    pub(crate) fn parent_index(&self) -> Vec<Option<NodeId>> {
        let mut parents = vec![None; self.nodes.len()];

        for (index, node) in self.nodes.iter().enumerate() {
            for child in &node.children {
                parents[child.0] = Some(NodeId(index));
            }
        }
        parents
    }

    /// Serializes the subtree rooted at `id`.
    pub(crate) fn serialize(&self, id: NodeId) -> io::Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;

        String::from_utf8(writer.into_inner())
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> io::Result<()> {
        let node = &self.nodes[id.0];

        match &node.data {
            NodeData::Element { name, attributes } => {
                let mut start = BytesStart::new(name.as_str());
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }

                if node.children.is_empty() && VOID_ELEMENTS.contains(&name.as_str()) {
                    return writer.write_event(Event::Empty(start));
                }
                writer.write_event(Event::Start(start))?;
                for &child in &node.children {
                    self.write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))
            }
            NodeData::Text(text) => writer.write_event(Event::Text(BytesText::new(text))),
            NodeData::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str()))),
            NodeData::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
            }
        }
    }
}

fn element_data(
    ns: &ResolveResult<'_>,
    start: &BytesStart<'_>,
    entities: &EntityTable,
) -> Result<NodeData, SanitizationFailure> {
    let name = match ns {
        ResolveResult::Bound(Namespace(ns)) if *ns == XHTML_NAMESPACE => start.local_name().into_inner(),
        _ => start.name().into_inner(),
    };
    let mut attributes = Vec::new();

    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = str::from_utf8(attribute.key.as_ref())?;
        let value = entities.unescape(str::from_utf8(&attribute.value)?)?;

        let is_xmlns = key == "xmlns" || key.starts_with("xmlns:");
        if is_xmlns && value.as_bytes() == XHTML_NAMESPACE {
            continue;
        }
        attributes.push((key.to_owned(), value.into_owned()));
    }

    Ok(NodeData::Element {
        name: str::from_utf8(name)?.to_owned(),
        attributes,
    })
}
