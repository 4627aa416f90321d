//! Arena-backed document tree
//!
//!     All nodes live in one `Vec`; a `NodeId` is an index into it. Parent
//!     links are plain ids, so the arena is the only owner and cycles
//!     cannot be expressed by construction. Node 0 is always the synthetic
//!     document root: an unnamed node whose children are the document's
//!     top-level elements. It is never serialized as a tag.
//!
//!     Text is a field on the node, not a child: text runs append to the
//!     enclosing node's text content in encounter order. Whitespace-only
//!     text is layout, not data; [`Node::significant_text`] is the single
//!     place that distinction is made.

use serde::{Deserialize, Serialize};

use super::token::Attribute;

/// Index of a node in its tree's arena.
///
/// Ids are only meaningful for the tree that produced them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> NodeId {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One element (or the document root) in the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name; empty only for the document root.
    pub name: String,
    /// Attributes in insertion order. Key uniqueness is the builder's
    /// contract, not enforced here.
    pub attributes: Vec<Attribute>,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
    /// Accumulated text runs, in encounter order.
    pub text: Option<String>,
    /// `None` only for the document root.
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(name: String, attributes: Vec<Attribute>, parent: Option<NodeId>) -> Node {
        Node {
            name,
            attributes,
            children: Vec::new(),
            text: None,
            parent,
        }
    }

    /// Value of the attribute `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// The node's text if it contains at least one non-whitespace char.
    ///
    /// Whitespace-only text is layout: the formatter replaces it, the
    /// codec and the exporters drop it.
    pub fn significant_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| t.chars().any(|c| !c.is_whitespace()))
    }

    /// True for the synthetic document root.
    pub fn is_document_root(&self) -> bool {
        self.parent.is_none() && self.name.is_empty()
    }
}

/// An XML document: the arena, its root, and the optional `<?xml ...?>`
/// declaration the source carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    declaration: Option<String>,
}

impl Tree {
    /// A tree holding only the document root.
    pub fn new() -> Tree {
        Tree {
            nodes: vec![Node::new(String::new(), Vec::new(), None)],
            root: NodeId(0),
            declaration: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes, document root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The document's top-level elements.
    pub fn top_level(&self) -> &[NodeId] {
        &self.node(self.root).children
    }

    /// True when the document root has no element children.
    pub fn has_no_elements(&self) -> bool {
        self.top_level().is_empty()
    }

    /// Raw `<?xml ...?>` declaration lexeme, when the source had one.
    pub fn declaration(&self) -> Option<&str> {
        self.declaration.as_deref()
    }

    pub fn set_declaration(&mut self, raw: impl Into<String>) {
        self.declaration = Some(raw.into());
    }

    /// Append a new element under `parent` and return its id.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes
            .push(Node::new(name.into(), attributes, Some(parent)));
        self.node_mut(parent).children.push(id);
        id
    }

    /// Append a text run to `id`'s text content.
    pub fn append_text(&mut self, id: NodeId, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.node_mut(id)
            .text
            .get_or_insert_with(String::new)
            .push_str(chunk);
    }

    /// Pre-order traversal starting at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// All elements named `name`, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(self.root)
            .filter(move |id| self.node(*id).name == name)
    }

    /// First child of `id` named `name`.
    pub fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|c| self.node(*c).name == name)
    }

    /// The projection the codec and the exporters see: whitespace-only
    /// text and the declaration dropped, structure and significant text
    /// intact. Ids are preserved, so trees built in document order compare
    /// equal to their decoded counterparts.
    pub fn normalized(&self) -> Tree {
        let mut nodes = self.nodes.clone();
        for node in &mut nodes {
            if node
                .text
                .as_deref()
                .is_some_and(|t| t.chars().all(char::is_whitespace))
            {
                node.text = None;
            }
        }
        Tree {
            nodes,
            root: self.root,
            declaration: None,
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

/// Explicit-stack pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev());
        Some(id)
    }
}
