//! Visitor combinators: delegation and skipping-by-policy.
//!
//! Delegation lets independent concerns (say, a counting observer and a
//! rewriting pass) share one traversal without re-implementing dispatch.
//! `enter_*` calls go to each delegate in declaration order and the *last*
//! delegate's boolean governs descent — later delegates are authoritative
//! for control flow, earlier ones are side-effecting observers. `leave_*`
//! calls run in reverse order. Forwarding is hand-written per traversal
//! event; there is no reflection here.

use rustc_hash::FxHashSet;

use crate::ast::{CssTree, NodeId, NodeKind};

use super::controller::VisitCx;
use super::visitor::CssVisitor;

/// Combines N visitors into one traversal.
pub struct DelegatingVisitor<'a> {
    delegates: Vec<&'a mut dyn CssVisitor>,
}

impl<'a> DelegatingVisitor<'a> {
    pub fn new(delegates: Vec<&'a mut dyn CssVisitor>) -> Self {
        DelegatingVisitor { delegates }
    }
}

macro_rules! forward_event {
    ($enter:ident, $leave:ident) => {
        fn $enter(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
            let mut descend = true;
            for delegate in self.delegates.iter_mut() {
                descend = delegate.$enter(cx, id);
            }
            descend
        }
        fn $leave(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
            for delegate in self.delegates.iter_mut().rev() {
                delegate.$leave(cx, id);
            }
        }
    };
}

impl CssVisitor for DelegatingVisitor<'_> {
    forward_event!(enter_root, leave_root);
    forward_event!(enter_block, leave_block);
    forward_event!(enter_ruleset, leave_ruleset);
    forward_event!(enter_selector_list, leave_selector_list);
    forward_event!(enter_selector, leave_selector);
    forward_event!(enter_declaration_block, leave_declaration_block);
    forward_event!(enter_declaration, leave_declaration);
    forward_event!(enter_value, leave_value);
}

/// Caller-supplied safety predicate gating rewrites of a ruleset.
pub trait RewritePolicy {
    fn can_modify_ruleset(&self, tree: &CssTree, ruleset: NodeId) -> bool;
}

/// Policy that permits everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissivePolicy;

impl RewritePolicy for PermissivePolicy {
    fn can_modify_ruleset(&self, _tree: &CssTree, _ruleset: NodeId) -> bool {
        true
    }
}

/// Policy that forbids touching any ruleset declaring one of the listed
/// properties (properties whose effect is known unsafe to rewrite).
#[derive(Debug, Default)]
pub struct UnsafePropertyPolicy {
    properties: FxHashSet<String>,
}

impl UnsafePropertyPolicy {
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UnsafePropertyPolicy {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl RewritePolicy for UnsafePropertyPolicy {
    fn can_modify_ruleset(&self, tree: &CssTree, ruleset: NodeId) -> bool {
        let Some(block) = tree.declaration_block_of(ruleset) else {
            return true;
        };
        !tree.children(block).iter().any(|&decl| {
            matches!(
                tree.kind(decl),
                NodeKind::Declaration { property, .. } if self.properties.contains(property)
            )
        })
    }
}

/// Wraps a visitor and unconditionally refuses to descend into (or mutate)
/// any ruleset the policy rejects, regardless of what the wrapped visitor
/// would otherwise decide.
pub struct SkippingVisitor<'a> {
    inner: &'a mut dyn CssVisitor,
    policy: &'a dyn RewritePolicy,
}

impl<'a> SkippingVisitor<'a> {
    pub fn new(inner: &'a mut dyn CssVisitor, policy: &'a dyn RewritePolicy) -> Self {
        SkippingVisitor { inner, policy }
    }
}

impl CssVisitor for SkippingVisitor<'_> {
    fn enter_root(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_root(cx, id)
    }
    fn leave_root(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_root(cx, id);
    }

    fn enter_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_block(cx, id)
    }
    fn leave_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_block(cx, id);
    }

    fn enter_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        if !self.policy.can_modify_ruleset(cx.tree(), id) {
            return false;
        }
        self.inner.enter_ruleset(cx, id)
    }
    fn leave_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_ruleset(cx, id);
    }

    fn enter_selector_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_selector_list(cx, id)
    }
    fn leave_selector_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_selector_list(cx, id);
    }

    fn enter_selector(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_selector(cx, id)
    }
    fn leave_selector(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_selector(cx, id);
    }

    fn enter_declaration_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_declaration_block(cx, id)
    }
    fn leave_declaration_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_declaration_block(cx, id);
    }

    fn enter_declaration(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_declaration(cx, id)
    }
    fn leave_declaration(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_declaration(cx, id);
    }

    fn enter_value(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.inner.enter_value(cx, id)
    }
    fn leave_value(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.inner.leave_value(cx, id);
    }
}
