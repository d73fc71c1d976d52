//! Navigation tree parsed from the NCX document.
//!
//! Nodes live in a flat arena in document order; tree edges are stored as
//! child indices and the parent lookup is derived once, on demand.

use std::sync::OnceLock;

/// Index of a [`NavNode`] within its [`NavTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavNodeId(usize);

impl NavNodeId {
    /// The position of the node in document order, starting at `0`.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The kind of NCX element a [`NavNode`] originates from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavNodeKind {
    /// `<navPoint>` within `<navMap>`.
    Point,
    /// `<navTarget>` within `<navList>`.
    Target,
}

/// A navigation node: title, href, play order and nesting depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavNode {
    pub(crate) id: NavNodeId,
    pub(crate) kind: NavNodeKind,
    pub(crate) title: String,
    pub(crate) href: String,
    pub(crate) path: String,
    pub(crate) play_order: u32,
    pub(crate) depth: usize,
    pub(crate) children: Vec<NavNodeId>,
}

impl NavNode {
    pub fn id(&self) -> NavNodeId {
        self.id
    }

    pub fn kind(&self) -> NavNodeKind {
        self.kind
    }

    /// The node label, or the owning document's title when the label is absent.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The `src` of the node exactly as declared (path + optional fragment),
    /// relative to the NCX document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The fragment of [`Self::href`], if any.
    pub fn fragment(&self) -> Option<&str> {
        self.href.split_once('#').map(|(_, fragment)| fragment)
    }

    /// The archive path the node points to, with the fragment stripped.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The NCX-declared linear rank of this node, independent of nesting depth.
    pub fn play_order(&self) -> u32 {
        self.play_order
    }

    /// Nesting depth; top-level nodes have a depth of `1`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if this node has child nodes.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A hierarchical table of contents.
///
/// The synthetic root owns the top-level `navPoint` nodes; `navTarget` nodes
/// are kept alongside the tree with a depth of `1`.
/// All queries are pure reads over the already-built tree.
#[derive(Clone, Debug, Default)]
pub struct NavTree {
    pub(crate) nodes: Vec<NavNode>,
    pub(crate) roots: Vec<NavNodeId>,
    pub(crate) doc_title: Option<String>,
    pub(crate) declared_depth: Option<usize>,
    parents: OnceLock<Vec<Option<NavNodeId>>>,
}

impl NavTree {
    /// Creates a node at the end of the arena, attached to `parent`
    /// (or the synthetic root when [`None`] and the node is a point).
    pub(crate) fn push(&mut self, mut node: NavNode, parent: Option<NavNodeId>) -> NavNodeId {
        let id = NavNodeId(self.nodes.len());
        node.id = id;

        match parent {
            Some(parent) => {
                node.depth = self.nodes[parent.0].depth + 1;
                self.nodes[parent.0].children.push(id);
            }
            None => {
                node.depth = 1;
                if node.kind == NavNodeKind::Point {
                    self.roots.push(id);
                }
            }
        }
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NavNodeId) -> &mut NavNode {
        &mut self.nodes[id.0]
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: NavNodeId) -> Option<&NavNode> {
        self.nodes.get(id.0)
    }

    /// The `docTitle` of the NCX document, if declared.
    pub fn doc_title(&self) -> Option<&str> {
        self.doc_title.as_deref()
    }

    /// The `dtb:depth` directive of the NCX document.
    ///
    /// Informational only; it is not checked against the actual nesting.
    pub fn declared_depth(&self) -> Option<usize> {
        self.declared_depth
    }

    /// Every node (points and targets) in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavNode> {
        self.nodes.iter()
    }

    /// Every `navPoint` node in document order.
    pub fn points(&self) -> impl Iterator<Item = &NavNode> + '_ {
        self.iter().filter(|node| node.kind == NavNodeKind::Point)
    }

    /// Every `navTarget` node in document order.
    pub fn targets(&self) -> impl Iterator<Item = &NavNode> + '_ {
        self.iter().filter(|node| node.kind == NavNodeKind::Target)
    }

    /// The top-level nodes (children of the synthetic root) in document order.
    pub fn top_level(&self) -> impl DoubleEndedIterator<Item = &NavNode> + ExactSizeIterator + '_ {
        self.roots.iter().map(|id| &self.nodes[id.0])
    }

    /// Every point at exactly `depth` (`1` = top level), in document order.
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<&NavNode> {
        self.points().filter(|node| node.depth == depth).collect()
    }

    /// Every point at `depth` or shallower, in document order.
    ///
    /// For a tree that is populated down to `depth`, each level contributes
    /// a strict superset of the previous level's result.
    pub fn nodes_within_depth(&self, depth: usize) -> Vec<&NavNode> {
        self.points().filter(|node| node.depth <= depth).collect()
    }

    /// The direct children of `node`, in document order.
    pub fn children(&self, node: &NavNode) -> Vec<&NavNode> {
        node.children.iter().map(|id| &self.nodes[id.0]).collect()
    }

    /// The parent of the node with the given id,
    /// or [`None`] for top-level nodes and targets.
    pub fn parent(&self, id: NavNodeId) -> Option<&NavNode> {
        let parents = self.parents.get_or_init(|| self.parent_index());

        parents
            .get(id.0)
            .copied()
            .flatten()
            .map(|id| &self.nodes[id.0])
    }

    fn parent_index(&self) -> Vec<Option<NavNodeId>> {
        let mut parents = vec![None; self.nodes.len()];

        for node in &self.nodes {
            for child in &node.children {
                parents[child.0] = Some(node.id);
            }
        }
        parents
    }

    /// The number of nodes (points and targets).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the NCX document declares no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PartialEq for NavTree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.roots == other.roots
            && self.doc_title == other.doc_title
            && self.declared_depth == other.declared_depth
    }
}

impl Eq for NavTree {}

impl NavNode {
    pub(crate) fn new(kind: NavNodeKind, play_order: u32) -> Self {
        Self {
            id: NavNodeId(0),
            kind,
            title: String::new(),
            href: String::new(),
            path: String::new(),
            play_order,
            depth: 0,
            children: Vec::new(),
        }
    }
}
