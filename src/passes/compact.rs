//! The removal-set consumer.
//!
//! Physically deletes every ruleset the analysis passes marked, then leaves
//! the set empty. This is the only place marked nodes are unlinked; keeping
//! deletion in one late pass lets the analyses stay read-mostly and never
//! invalidate each other's iteration.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::ast::{CssTree, NodeId};
use crate::visit::{CssVisitor, MutatingVisitController, VisitCx};

use super::{Pass, PassContext};

#[derive(Debug, Default)]
pub struct CompactRemovedRulesets;

impl CompactRemovedRulesets {
    pub fn new() -> Self {
        CompactRemovedRulesets
    }
}

impl Pass for CompactRemovedRulesets {
    fn id(&self) -> &'static str {
        "compact-removed-rulesets"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["mark-overridden-rulesets", "merge-adjacent-rulesets"]
    }

    fn run(&mut self, tree: &mut CssTree, ctx: &mut PassContext<'_>) {
        let marked = ctx.removal.take();
        if marked.is_empty() {
            return;
        }
        let mut sweeper = Sweeper { marked, removed: 0 };
        MutatingVisitController::start_visit(tree, &mut sweeper);
        debug!(removed = sweeper.removed, "compacted removed rulesets");
    }
}

struct Sweeper {
    marked: FxHashSet<NodeId>,
    removed: usize,
}

impl CssVisitor for Sweeper {
    fn enter_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        if self.marked.contains(&id) {
            cx.remove_current();
            self.removed += 1;
        }
        true
    }
}
