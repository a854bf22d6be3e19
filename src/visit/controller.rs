//! The mutating visit controller.
//!
//! Performs the depth-first pre-order walk and owns the only sanctioned way
//! to edit a child sequence that is under traversal. The walk iterates a
//! live index cursor into the parent's real child vector; every edit adjusts
//! the cursor by the net change in sibling count, so a visitor may grow,
//! shrink, or replace the sequence it is being iterated over.

use tracing::trace;

use crate::ast::{CssTree, NodeBase, NodeId, NodeKind};

use super::visitor::{dispatch_enter, dispatch_leave, CssVisitor};

/// Structural edit requested against the current cursor position.
#[derive(Debug)]
enum PendingEdit {
    /// Unlink the current node; traversal resumes at the next sibling.
    Remove,
    /// Splice `nodes` in place of the current node. With `revisit` the new
    /// nodes are visited next (full enter/leave cycle each); without it
    /// traversal resumes immediately after the inserted span.
    Replace { nodes: Vec<NodeId>, revisit: bool },
}

/// Mutation-capable traversal handle passed to every visitor method.
///
/// Read access and node allocation are unrestricted. Structural edits come
/// in two shapes: cursor edits (`replace_current`, `remove_current`) against
/// the node currently being visited, and `move_child`/`append_child` for
/// sequences that are not under traversal (e.g. reparenting selectors onto
/// another ruleset's selector list).
pub struct VisitCx<'t> {
    tree: &'t mut CssTree,
    pending: Option<PendingEdit>,
}

impl<'t> VisitCx<'t> {
    pub fn tree(&self) -> &CssTree {
        self.tree
    }

    /// Mutable access to a node's own fields (kind data, base metadata).
    pub fn node_mut(&mut self, id: NodeId) -> &mut crate::ast::Node {
        self.tree.node_mut(id)
    }

    /// Allocate a detached node for later splicing.
    pub fn alloc(&mut self, kind: NodeKind, base: NodeBase) -> NodeId {
        self.tree.alloc(kind, base)
    }

    /// Deep-clone a subtree into detached nodes.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        self.tree.clone_subtree(id)
    }

    /// Append a detached node to a parent that is not under traversal.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    /// Reparent `child` onto `new_parent`. Neither the old nor the new
    /// child sequence may be under traversal.
    pub fn move_child(&mut self, child: NodeId, new_parent: NodeId) {
        self.tree.detach(child);
        self.tree.append_child(new_parent, child);
    }

    /// Splice `nodes` in place of the current node. The current node is
    /// orphaned once the triggering visitor method returns; its descent and
    /// leave call are suppressed when requested during `enter_*`.
    pub fn replace_current(&mut self, nodes: Vec<NodeId>, revisit: bool) {
        assert!(
            self.pending.is_none(),
            "replace_current: an edit is already pending at this position"
        );
        trace!(count = nodes.len(), revisit, "replace_current");
        self.pending = Some(PendingEdit::Replace { nodes, revisit });
    }

    /// Unlink the current node; traversal resumes at the next sibling.
    pub fn remove_current(&mut self) {
        assert!(
            self.pending.is_none(),
            "remove_current: an edit is already pending at this position"
        );
        trace!("remove_current");
        self.pending = Some(PendingEdit::Remove);
    }
}

/// Drives a visitor over a tree with mutation support.
pub struct MutatingVisitController;

impl MutatingVisitController {
    /// Walk the whole tree from its root.
    pub fn start_visit(tree: &mut CssTree, visitor: &mut dyn CssVisitor) {
        let root = tree.root();
        Self::start_visit_at(tree, root, visitor);
    }

    /// Walk the subtree under `start`. The start node itself has no
    /// enclosing cursor, so cursor edits against it are invariant
    /// violations.
    pub fn start_visit_at(tree: &mut CssTree, start: NodeId, visitor: &mut dyn CssVisitor) {
        let mut cx = VisitCx {
            tree,
            pending: None,
        };
        visit_node(&mut cx, start, visitor);
        assert!(
            cx.pending.is_none(),
            "edit requested against the traversal start node, which has no enclosing child sequence"
        );
    }
}

fn visit_node(cx: &mut VisitCx<'_>, id: NodeId, visitor: &mut dyn CssVisitor) {
    let descend = dispatch_enter(visitor, cx, id);
    if cx.pending.is_some() {
        // The node was removed or replaced during enter: it is already
        // logically orphaned, so neither its children nor its leave run.
        return;
    }
    if !descend {
        return;
    }
    visit_children(cx, id, visitor);
    dispatch_leave(visitor, cx, id);
}

fn visit_children(cx: &mut VisitCx<'_>, parent: NodeId, visitor: &mut dyn CssVisitor) {
    let mut index = 0;
    while index < cx.tree.child_count(parent) {
        let child = cx.tree.children(parent)[index];
        visit_node(cx, child, visitor);
        match cx.pending.take() {
            None => index += 1,
            Some(PendingEdit::Remove) => {
                cx.tree.detach(child);
                // Net change -1: the next sibling now sits at `index`.
            }
            Some(PendingEdit::Replace { nodes, revisit }) => {
                let count = nodes.len();
                cx.tree.replace_child_at(parent, index, nodes);
                if !revisit {
                    // Skip the inserted span entirely.
                    index += count;
                }
                // With revisit the cursor stays put and the loop visits
                // each inserted node in order.
            }
        }
    }
}
