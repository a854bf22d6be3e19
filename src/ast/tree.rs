//! Arena-backed stylesheet tree.
//!
//! The [`CssTree`] owns every node in a flat arena and is the sole entry
//! point for traversal. Children are held as an exclusive ordered sequence
//! of ids; the parent link is a non-owning back-reference used for upward
//! queries only, never for ownership or iteration order. Detached nodes stay
//! in the arena but are unreachable from the root; slots are not reused
//! within a run.

use tracing::trace;

use super::node::{Combinator, NodeBase, NodeKind, Refiner};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One tree element: its kind, shared metadata, and links.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub base: NodeBase,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, base: NodeBase) -> Self {
        Node {
            kind,
            base,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The stylesheet tree. Owns exactly one `Root`.
#[derive(Debug)]
pub struct CssTree {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Default for CssTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CssTree {
    /// Create a tree holding a `Root` with one empty body `Block`.
    pub fn new() -> Self {
        let mut tree = CssTree {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
        };
        let root = tree.alloc(NodeKind::Root, NodeBase::new());
        let body = tree.alloc(NodeKind::Block, NodeBase::new());
        tree.root = root;
        tree.body = body;
        tree.append_child(root, body);
        tree
    }

    /// The tree's `Root` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The top-level `Block` under the root.
    pub fn body(&self) -> NodeId {
        self.body
    }

    // =======================================================================
    // Node access
    // =======================================================================

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Mutable access to a node's own data (`kind`, `base`). The child
    /// sequence is not reachable through this; structural edits go through
    /// the link-surgery methods below or the visit controller.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.index()].children.len()
    }

    /// Position of `id` in its parent's child sequence.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Whether `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            cur = parent;
        }
        cur == self.root
    }

    // =======================================================================
    // Allocation and link surgery
    // =======================================================================

    /// Allocate a detached node.
    pub fn alloc(&mut self, kind: NodeKind, base: NodeBase) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("node arena overflow"));
        self.nodes.push(Node::new(kind, base));
        id
    }

    /// Append a detached node as the last child of `parent`.
    ///
    /// Must not target a child sequence currently under traversal by a visit
    /// controller; mid-traversal edits to that sequence go through the
    /// controller's context instead.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.index()].parent.is_none(),
            "append_child: node {:?} already has a parent",
            child
        );
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Unlink `child` from its parent. The node is immediately orphaned:
    /// its parent link is cleared and it no longer appears in any child
    /// sequence. No-op for already-detached nodes.
    ///
    /// Same traversal caveat as [`CssTree::append_child`].
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.index()].parent.take() else {
            return;
        };
        let siblings = &mut self.nodes[parent.index()].children;
        if let Some(pos) = siblings.iter().position(|&c| c == child) {
            siblings.remove(pos);
        }
        trace!(node = ?child, kind = self.kind(child).name(), "detached");
    }

    /// Splice `replacements` in place of the child at `index`, orphaning the
    /// old child. Controller-internal: this is the primitive behind
    /// `replace_current`/`remove_current`.
    pub(crate) fn replace_child_at(
        &mut self,
        parent: NodeId,
        index: usize,
        replacements: Vec<NodeId>,
    ) {
        let old = self.nodes[parent.index()].children[index];
        self.nodes[old.index()].parent = None;
        for &new in &replacements {
            assert!(
                self.nodes[new.index()].parent.is_none(),
                "replace_child_at: replacement {:?} already has a parent",
                new
            );
            self.nodes[new.index()].parent = Some(parent);
        }
        self.nodes[parent.index()]
            .children
            .splice(index..=index, replacements);
    }

    /// Deep-clone the subtree rooted at `id` into detached nodes and return
    /// the clone's root. The clone shares nothing with the original.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.index()].kind.clone();
        let base = self.nodes[id.index()].base.clone();
        let clone = self.alloc(kind, base);
        let children: Vec<NodeId> = self.children(id).to_vec();
        for child in children {
            let child_clone = self.clone_subtree(child);
            self.append_child(clone, child_clone);
        }
        clone
    }

    // =======================================================================
    // Parser-facing constructors
    // =======================================================================

    pub fn numeric(&mut self, magnitude: impl Into<String>, unit: impl Into<String>) -> NodeId {
        self.alloc(
            NodeKind::Numeric {
                magnitude: magnitude.into(),
                unit: unit.into(),
            },
            NodeBase::new(),
        )
    }

    pub fn literal(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Literal { text: text.into() }, NodeBase::new())
    }

    pub fn string_value(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Str { text: text.into() }, NodeBase::new())
    }

    pub fn hex_color(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::HexColor { text: text.into() }, NodeBase::new())
    }

    pub fn constant_reference(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(
            NodeKind::ConstantReference { name: name.into() },
            NodeBase::new(),
        )
    }

    pub fn function_call(&mut self, name: impl Into<String>, args: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::FunctionCall { name: name.into() }, NodeBase::new());
        for arg in args {
            self.append_child(id, arg);
        }
        id
    }

    pub fn composite(&mut self, operator: impl Into<String>, operands: Vec<NodeId>) -> NodeId {
        let id = self.alloc(
            NodeKind::Composite {
                operator: operator.into(),
            },
            NodeBase::new(),
        );
        for operand in operands {
            self.append_child(id, operand);
        }
        id
    }

    /// Create a selector. Chain further selectors by setting `combinator`
    /// and appending the chained selector as the node's child.
    pub fn selector(
        &mut self,
        name: impl Into<String>,
        refiners: Vec<Refiner>,
        combinator: Option<Combinator>,
    ) -> NodeId {
        self.alloc(
            NodeKind::Selector {
                name: name.into(),
                refiners,
                combinator,
            },
            NodeBase::new(),
        )
    }

    /// Create a declaration owning `values`. A `Priority` child is appended
    /// when `important` is set; the `custom` flag is derived from the
    /// property name.
    pub fn declaration(
        &mut self,
        property: impl Into<String>,
        values: Vec<NodeId>,
        important: bool,
        star_hack: bool,
    ) -> NodeId {
        let property = property.into();
        let custom = property.starts_with("--");
        let id = self.alloc(
            NodeKind::Declaration {
                property,
                important,
                star_hack,
                custom,
            },
            NodeBase::new(),
        );
        for value in values {
            self.append_child(id, value);
        }
        if important {
            let priority = self.alloc(NodeKind::Priority, NodeBase::new());
            self.append_child(id, priority);
        }
        id
    }

    /// Create a ruleset from its selectors and declarations, wiring up the
    /// `SelectorList` and `DeclarationBlock` children.
    pub fn ruleset(&mut self, selectors: Vec<NodeId>, declarations: Vec<NodeId>) -> NodeId {
        let ruleset = self.alloc(NodeKind::Ruleset, NodeBase::new());
        let selector_list = self.alloc(NodeKind::SelectorList, NodeBase::new());
        let declaration_block = self.alloc(NodeKind::DeclarationBlock, NodeBase::new());
        for selector in selectors {
            self.append_child(selector_list, selector);
        }
        for declaration in declarations {
            self.append_child(declaration_block, declaration);
        }
        self.append_child(ruleset, selector_list);
        self.append_child(ruleset, declaration_block);
        ruleset
    }

    pub fn block(&mut self, children: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Block, NodeBase::new());
        for child in children {
            self.append_child(id, child);
        }
        id
    }

    // =======================================================================
    // Ruleset structure accessors
    // =======================================================================

    /// The `SelectorList` child of a ruleset, if present.
    pub fn selector_list_of(&self, ruleset: NodeId) -> Option<NodeId> {
        self.children(ruleset)
            .iter()
            .copied()
            .find(|&c| matches!(self.kind(c), NodeKind::SelectorList))
    }

    /// The `DeclarationBlock` child of a ruleset, if present.
    pub fn declaration_block_of(&self, ruleset: NodeId) -> Option<NodeId> {
        self.children(ruleset)
            .iter()
            .copied()
            .find(|&c| matches!(self.kind(c), NodeKind::DeclarationBlock))
    }
}
