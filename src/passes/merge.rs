//! Adjacent-ruleset merging.
//!
//! Folds consecutive rulesets whose declaration blocks render to identical
//! text into one ruleset with a combined selector list. Merging never
//! crosses a barrier: a non-ruleset child, a ruleset with an unknown
//! pseudo-element (an unrecognized `::x` can invalidate the whole rule in
//! some rendering engines), or a ruleset the safety policy forbids
//! touching. Folded rulesets are marked removable; the combined selector
//! list is built by reparenting the live selector nodes.
//!
//! Runs against declaration text as it currently stands, so it is ordered
//! after the redundancy marks have been applied (or before that analysis
//! starts).

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::ast::{CssTree, NodeId, NodeKind, RefinerKind};
use crate::render;
use crate::visit::{CssVisitor, MutatingVisitController, PermissivePolicy, RewritePolicy, VisitCx};

use super::{Pass, PassContext};

/// Pseudo-element names with defined merge behavior. Anything else is
/// treated as unknown and acts as a barrier.
static RECOGNIZED_PSEUDO_ELEMENTS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| ["first-line", "first-letter", "before", "after"].into_iter().collect());

pub struct MergeAdjacentRulesets {
    policy: Box<dyn RewritePolicy>,
}

impl Default for MergeAdjacentRulesets {
    fn default() -> Self {
        MergeAdjacentRulesets::new()
    }
}

impl MergeAdjacentRulesets {
    pub fn new() -> Self {
        MergeAdjacentRulesets {
            policy: Box::new(PermissivePolicy),
        }
    }

    pub fn with_policy(policy: Box<dyn RewritePolicy>) -> Self {
        MergeAdjacentRulesets { policy }
    }
}

impl Pass for MergeAdjacentRulesets {
    fn id(&self) -> &'static str {
        "merge-adjacent-rulesets"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        // Merging builds multi-selector rulesets, which the override
        // analysis (split precondition) must never see afterwards.
        &["mark-overridden-rulesets"]
    }

    fn run(&mut self, tree: &mut CssTree, ctx: &mut PassContext<'_>) {
        let mut scan = MergeScan {
            policy: self.policy.as_ref(),
            marked: Vec::new(),
        };
        MutatingVisitController::start_visit(tree, &mut scan);
        debug!(merged = scan.marked.len(), "adjacent merge finished");
        for ruleset in scan.marked {
            ctx.removal.mark(ruleset);
        }
    }
}

struct MergeScan<'a> {
    policy: &'a dyn RewritePolicy,
    marked: Vec<NodeId>,
}

impl CssVisitor for MergeScan<'_> {
    fn enter_block(&mut self, cx: &mut VisitCx<'_>, block: NodeId) -> bool {
        // Single left-to-right scan of the block's direct children. The
        // child sequence itself is never edited here (folded rulesets are
        // only marked), so iterating by index stays sound while selector
        // lists below are rewired.
        let mut candidate: Option<NodeId> = None;
        let mut index = 0;
        while index < cx.tree().child_count(block) {
            let child = cx.tree().children(block)[index];
            index += 1;

            if is_barrier(cx.tree(), child, self.policy) {
                candidate = None;
                continue;
            }

            let Some(open) = candidate else {
                candidate = Some(child);
                continue;
            };

            if declarations_match(cx.tree(), open, child) {
                merge_into(cx, open, child);
                self.marked.push(child);
                // The candidate stays open for further identical rulesets.
            } else {
                candidate = Some(child);
            }
        }
        true
    }
}

/// Whether analysis must not merge with or across this node.
fn is_barrier(tree: &CssTree, node: NodeId, policy: &dyn RewritePolicy) -> bool {
    if !matches!(tree.kind(node), NodeKind::Ruleset) {
        return true;
    }
    if has_unknown_pseudo_element(tree, node) {
        return true;
    }
    !policy.can_modify_ruleset(tree, node)
}

fn has_unknown_pseudo_element(tree: &CssTree, ruleset: NodeId) -> bool {
    let Some(selector_list) = tree.selector_list_of(ruleset) else {
        return false;
    };
    tree.children(selector_list)
        .iter()
        .any(|&selector| chain_has_unknown_pseudo_element(tree, selector))
}

fn chain_has_unknown_pseudo_element(tree: &CssTree, selector: NodeId) -> bool {
    let mut current = Some(selector);
    while let Some(sel) = current {
        let NodeKind::Selector { refiners, .. } = tree.kind(sel) else {
            return false;
        };
        if refiners.iter().any(|r| {
            r.kind == RefinerKind::PseudoElement
                && !RECOGNIZED_PSEUDO_ELEMENTS.contains(r.name.as_str())
        }) {
            return true;
        }
        current = tree.children(sel).first().copied();
    }
    false
}

fn declarations_match(tree: &CssTree, a: NodeId, b: NodeId) -> bool {
    let (Some(block_a), Some(block_b)) =
        (tree.declaration_block_of(a), tree.declaration_block_of(b))
    else {
        return false;
    };
    render::declaration_block_text(tree, block_a) == render::declaration_block_text(tree, block_b)
}

/// Append `folded`'s selectors onto `candidate`'s selector list.
fn merge_into(cx: &mut VisitCx<'_>, candidate: NodeId, folded: NodeId) {
    let (Some(target), Some(source)) = (
        cx.tree().selector_list_of(candidate),
        cx.tree().selector_list_of(folded),
    ) else {
        return;
    };
    trace!(
        candidate = %render::selector_list_text(cx.tree(), target),
        folded = %render::selector_list_text(cx.tree(), source),
        "merging selector lists"
    );
    let selectors: Vec<NodeId> = cx.tree().children(source).to_vec();
    for selector in selectors {
        cx.move_child(selector, target);
    }
}
