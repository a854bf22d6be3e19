//! Positional value abbreviation.
//!
//! For properties following the top/right/bottom/left pattern, a value
//! equal to its mirror can be dropped: `1px 2px 3px 2px` says nothing more
//! than `1px 2px 3px`. The reduction is a pure function; the pass wraps it
//! and rewrites qualifying declarations through the mutation protocol.

use tracing::trace;

use crate::ast::{CssTree, NodeBase, NodeId, NodeKind};
use crate::property::PropertyRegistry;
use crate::visit::{CssVisitor, MutatingVisitController, VisitCx};

use super::{Pass, PassContext};

/// Positional value equality: numerics match on magnitude text and unit,
/// literals on text, hex colors on canonical text. Other kinds never
/// compare equal.
fn values_equal(tree: &CssTree, a: NodeId, b: NodeId) -> bool {
    match (tree.kind(a), tree.kind(b)) {
        (
            NodeKind::Numeric {
                magnitude: m1,
                unit: u1,
            },
            NodeKind::Numeric {
                magnitude: m2,
                unit: u2,
            },
        ) => m1 == m2 && u1 == u2,
        (NodeKind::Literal { text: t1 }, NodeKind::Literal { text: t2 }) => t1 == t2,
        (NodeKind::HexColor { text: t1 }, NodeKind::HexColor { text: t2 }) => {
            t1.eq_ignore_ascii_case(t2)
        }
        _ => false,
    }
}

/// Attempt to shorten a positional value list of length 2–4 in the fixed
/// order: drop `left` when it equals `right`, then `bottom` when it equals
/// `top`, then `right` when it equals `top`. Returns the surviving ids, or
/// `None` when no reduction applies.
pub fn abbreviate(tree: &CssTree, values: &[NodeId]) -> Option<Vec<NodeId>> {
    if !(2..=4).contains(&values.len()) {
        return None;
    }
    let mut kept = values.to_vec();
    // kept[0] = top, kept[1] = right, kept[2] = bottom, kept[3] = left
    if kept.len() == 4 && values_equal(tree, kept[3], kept[1]) {
        kept.pop();
    }
    if kept.len() == 3 && values_equal(tree, kept[2], kept[0]) {
        kept.pop();
    }
    if kept.len() == 2 && values_equal(tree, kept[1], kept[0]) {
        kept.pop();
    }
    (kept.len() < values.len()).then_some(kept)
}

/// Pass rewriting declarations of positional properties with abbreviated
/// value lists.
#[derive(Debug, Default)]
pub struct AbbreviatePositionalValues;

impl AbbreviatePositionalValues {
    pub fn new() -> Self {
        AbbreviatePositionalValues
    }
}

impl Pass for AbbreviatePositionalValues {
    fn id(&self) -> &'static str {
        "abbreviate-positional-values"
    }

    fn run(&mut self, tree: &mut CssTree, ctx: &mut PassContext<'_>) {
        let mut rewriter = AbbreviationRewriter {
            registry: ctx.registry,
        };
        MutatingVisitController::start_visit(tree, &mut rewriter);
    }
}

struct AbbreviationRewriter<'a> {
    registry: &'a dyn PropertyRegistry,
}

impl CssVisitor for AbbreviationRewriter<'_> {
    fn enter_declaration(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let NodeKind::Declaration {
            property,
            important,
            star_hack,
            custom,
        } = cx.tree().kind(id)
        else {
            return false;
        };
        let (property, important, star_hack, custom) =
            (property.clone(), *important, *star_hack, *custom);
        if custom {
            return false;
        }
        let descriptor = self.registry.lookup(&property);
        if !descriptor.has_positional_parameters {
            return false;
        }

        let positional: Vec<NodeId> = cx
            .tree()
            .children(id)
            .iter()
            .copied()
            .filter(|&v| !matches!(cx.tree().kind(v), NodeKind::Priority))
            .collect();
        let Some(kept) = abbreviate(cx.tree(), &positional) else {
            return false;
        };
        trace!(
            property = %property,
            before = positional.len(),
            after = kept.len(),
            "abbreviating positional values"
        );

        let base = cx.tree().node(id).base.clone();
        let values: Vec<NodeId> = kept.iter().map(|&v| cx.clone_subtree(v)).collect();
        let replacement = cx.alloc(
            NodeKind::Declaration {
                property,
                important,
                star_hack,
                custom,
            },
            base,
        );
        for value in values {
            cx.append_child(replacement, value);
        }
        if important {
            let priority = cx.alloc(NodeKind::Priority, NodeBase::new());
            cx.append_child(replacement, priority);
        }
        cx.replace_current(vec![replacement], false);
        true
    }
}
