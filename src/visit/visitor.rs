//! The per-kind enter/leave visitor contract.
//!
//! A visitor receives `enter_*` for each node in depth-first pre-order.
//! Returning `true` descends into the children and ends with the matching
//! `leave_*`; returning `false` skips both the children and the leave call,
//! which lets a pass prune a subtree it has fully replaced or invalidated.
//! Mutation happens through the [`VisitCx`] handle, never on the tree
//! directly.

use crate::ast::{NodeId, NodeKind};

use super::controller::VisitCx;

/// Visitor over the stylesheet tree. Every method has a default: enters
/// descend everywhere, leaves do nothing, so an implementation overrides
/// only the node kinds it cares about.
pub trait CssVisitor {
    fn enter_root(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_root(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_selector_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_selector_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_selector(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_selector(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_declaration_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_declaration_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    fn enter_declaration(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_declaration(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }

    /// Covers every value variant (`Numeric`, `Literal`, `Str`, `HexColor`,
    /// `FunctionCall`, `Composite`, `Priority`, `ConstantReference`).
    /// Function arguments and composite operands are visited as children.
    fn enter_value(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let _ = (cx, id);
        true
    }
    fn leave_value(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        let _ = (cx, id);
    }
}

/// Traversal event classes, one per visitor method pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Root,
    Block,
    Ruleset,
    SelectorList,
    Selector,
    DeclarationBlock,
    Declaration,
    Value,
}

fn event_of(kind: &NodeKind) -> Event {
    match kind {
        NodeKind::Root => Event::Root,
        NodeKind::Block => Event::Block,
        NodeKind::Ruleset => Event::Ruleset,
        NodeKind::SelectorList => Event::SelectorList,
        NodeKind::Selector { .. } => Event::Selector,
        NodeKind::DeclarationBlock => Event::DeclarationBlock,
        NodeKind::Declaration { .. } => Event::Declaration,
        NodeKind::Numeric { .. }
        | NodeKind::Literal { .. }
        | NodeKind::Str { .. }
        | NodeKind::HexColor { .. }
        | NodeKind::FunctionCall { .. }
        | NodeKind::Composite { .. }
        | NodeKind::Priority
        | NodeKind::ConstantReference { .. } => Event::Value,
    }
}

pub(crate) fn dispatch_enter(
    visitor: &mut dyn CssVisitor,
    cx: &mut VisitCx<'_>,
    id: NodeId,
) -> bool {
    let event = event_of(cx.tree().kind(id));
    match event {
        Event::Root => visitor.enter_root(cx, id),
        Event::Block => visitor.enter_block(cx, id),
        Event::Ruleset => visitor.enter_ruleset(cx, id),
        Event::SelectorList => visitor.enter_selector_list(cx, id),
        Event::Selector => visitor.enter_selector(cx, id),
        Event::DeclarationBlock => visitor.enter_declaration_block(cx, id),
        Event::Declaration => visitor.enter_declaration(cx, id),
        Event::Value => visitor.enter_value(cx, id),
    }
}

pub(crate) fn dispatch_leave(visitor: &mut dyn CssVisitor, cx: &mut VisitCx<'_>, id: NodeId) {
    let event = event_of(cx.tree().kind(id));
    match event {
        Event::Root => visitor.leave_root(cx, id),
        Event::Block => visitor.leave_block(cx, id),
        Event::Ruleset => visitor.leave_ruleset(cx, id),
        Event::SelectorList => visitor.leave_selector_list(cx, id),
        Event::Selector => visitor.leave_selector(cx, id),
        Event::DeclarationBlock => visitor.leave_declaration_block(cx, id),
        Event::Declaration => visitor.leave_declaration(cx, id),
        Event::Value => visitor.leave_value(cx, id),
    }
}
