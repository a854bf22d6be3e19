//! Redundant-declaration elimination.
//!
//! Marks rulesets whose single declaration can never win the cascade:
//! overridden by a later declaration with the same selector and property
//! key, shadowed by a later shorthand, or belonging to a selector no
//! component ever references. Marks are purely additive into the removal
//! set; nothing is physically deleted here.
//!
//! Precondition: ruleset splitting has already run, so every ruleset holds
//! exactly one selector and exactly one declaration. A violation is a
//! pipeline-ordering bug and panics.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::ast::{CssTree, NodeId, NodeKind, RefinerKind, ALTERNATE_ANNOTATION};
use crate::property::PropertyRegistry;
use crate::render;
use crate::visit::{CssVisitor, MutatingVisitController, VisitCx};

use super::{Pass, PassContext};

/// Properties never eliminated: their effect is not confined to simple
/// override semantics.
static NEVER_ELIMINATED: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| ["display", "cursor"].into_iter().collect());

/// Allow-list of class-name tokens that are referenced from component
/// templates, together with the component class prefix. A ruleset whose
/// selector carries prefixed classes that contribute no allowed token is
/// dead code.
#[derive(Debug, Clone)]
pub struct ReferencedSelectors {
    allowed: FxHashSet<String>,
    prefix: String,
}

impl ReferencedSelectors {
    pub fn new<I, S>(allowed: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReferencedSelectors {
            allowed: allowed.into_iter().map(Into::into).collect(),
            prefix: prefix.into(),
        }
    }

    /// Whether the selector is structurally unreferenced: it has at least
    /// one class refiner carrying the prefix, and none of those classes'
    /// tokens (prefix stripped, split on `-`) appear in the allow-list.
    fn is_unreferenced(&self, tree: &CssTree, selector: NodeId) -> bool {
        let mut saw_prefixed_class = false;
        let mut referenced = false;
        let mut current = Some(selector);
        while let Some(sel) = current {
            let NodeKind::Selector { refiners, .. } = tree.kind(sel) else {
                break;
            };
            for refiner in refiners {
                if refiner.kind != RefinerKind::Class {
                    continue;
                }
                let Some(rest) = refiner.name.strip_prefix(&self.prefix) else {
                    continue;
                };
                saw_prefixed_class = true;
                if rest.split('-').any(|token| self.allowed.contains(token)) {
                    referenced = true;
                }
            }
            current = tree.children(sel).first().copied();
        }
        saw_prefixed_class && !referenced
    }
}

/// The override-analysis pass.
#[derive(Debug, Default)]
pub struct MarkOverriddenRulesets {
    referenced: Option<ReferencedSelectors>,
}

impl MarkOverriddenRulesets {
    pub fn new() -> Self {
        MarkOverriddenRulesets::default()
    }

    /// Enable dead-selector elimination against the given allow-list.
    pub fn with_referenced_selectors(referenced: ReferencedSelectors) -> Self {
        MarkOverriddenRulesets {
            referenced: Some(referenced),
        }
    }
}

impl Pass for MarkOverriddenRulesets {
    fn id(&self) -> &'static str {
        "mark-overridden-rulesets"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["split-rulesets"]
    }

    fn run(&mut self, tree: &mut CssTree, ctx: &mut PassContext<'_>) {
        let mut scan = OverrideScan {
            registry: ctx.registry,
            referenced: self.referenced.as_ref(),
            marked: Vec::new(),
        };
        MutatingVisitController::start_visit(tree, &mut scan);
        debug!(marked = scan.marked.len(), "override analysis finished");
        for ruleset in scan.marked {
            ctx.removal.mark(ruleset);
        }
    }
}

/// Surviving table entry for one `(selector, property-key)` pair.
struct Survivor {
    ruleset: NodeId,
    important: bool,
}

struct OverrideScan<'a> {
    registry: &'a dyn PropertyRegistry,
    referenced: Option<&'a ReferencedSelectors>,
    marked: Vec<NodeId>,
}

impl OverrideScan<'_> {
    /// Reverse scan of one block's direct children. CSS gives
    /// later-declared-wins for equal selector and property, so scanning
    /// backwards means the table always holds the declaration that
    /// dominates everything already seen. Non-ruleset children are
    /// barriers: they are never inspected and the table is reset so
    /// elimination never reaches across conditional boundaries.
    fn scan_block(&mut self, tree: &CssTree, block: NodeId) {
        let mut table: FxHashMap<(String, String), Survivor> = FxHashMap::default();
        for &child in tree.children(block).iter().rev() {
            if !matches!(tree.kind(child), NodeKind::Ruleset) {
                table.clear();
                continue;
            }
            self.scan_ruleset(tree, child, &mut table);
        }
    }

    fn scan_ruleset(
        &mut self,
        tree: &CssTree,
        ruleset: NodeId,
        table: &mut FxHashMap<(String, String), Survivor>,
    ) {
        let (selector, declaration) = split_ruleset_parts(tree, ruleset);

        if let Some(referenced) = self.referenced {
            if referenced.is_unreferenced(tree, selector) {
                trace!(
                    selector = %render::selector_text(tree, selector),
                    "unreferenced selector"
                );
                self.marked.push(ruleset);
                return;
            }
        }

        let NodeKind::Declaration {
            property,
            important,
            star_hack,
            ..
        } = tree.kind(declaration)
        else {
            panic!(
                "declaration block child is a `{}`, not a declaration",
                tree.kind(declaration).name()
            );
        };
        let (important, star_hack) = (*important, *star_hack);

        let descriptor = self.registry.lookup(property);
        if NEVER_ELIMINATED.contains(descriptor.name.as_str()) {
            return;
        }

        let alternate = tree.node(declaration).base.has_annotation(ALTERNATE_ANNOTATION);
        let selector_key = render::selector_text(tree, selector);
        let property_key = render::property_key(&descriptor.name, star_hack);
        let key = (selector_key, property_key);

        if let Some(survivor) = table.get(&key) {
            if important && !survivor.important {
                // The earlier declaration is important and the later one is
                // not: importance beats document order.
                trace!(selector = %key.0, property = %key.1, "demoting later survivor");
                self.marked.push(survivor.ruleset);
                if alternate {
                    table.remove(&key);
                } else {
                    table.insert(key, Survivor { ruleset, important });
                }
            } else {
                trace!(selector = %key.0, property = %key.1, "overridden");
                self.marked.push(ruleset);
            }
            return;
        }

        // No direct entry: a later shorthand for this selector shadows the
        // longhand unless only the longhand is important.
        let shadowed_by_shorthand = descriptor.shorthands.iter().any(|shorthand| {
            let shorthand_key = (key.0.clone(), render::property_key(shorthand, star_hack));
            table
                .get(&shorthand_key)
                .is_some_and(|entry| !important || entry.important)
        });
        if shadowed_by_shorthand {
            trace!(selector = %key.0, property = %key.1, "shadowed by shorthand");
            self.marked.push(ruleset);
            return;
        }

        // Alternate declarations are never stored, so they never shadow
        // earlier entries, but they stay eligible to be shadowed above.
        if !alternate {
            table.insert(key, Survivor { ruleset, important });
        }
    }
}

impl CssVisitor for OverrideScan<'_> {
    fn enter_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        self.scan_block(cx.tree(), id);
        // Descend so nested blocks get their own independent scan.
        true
    }
}

/// Splits a post-split ruleset into its single selector and declaration.
/// Panics when an earlier required pass was skipped.
fn split_ruleset_parts(tree: &CssTree, ruleset: NodeId) -> (NodeId, NodeId) {
    let selector_list = tree
        .selector_list_of(ruleset)
        .unwrap_or_else(|| panic!("ruleset without a selector list reached override analysis"));
    let declaration_block = tree
        .declaration_block_of(ruleset)
        .unwrap_or_else(|| panic!("ruleset without a declaration block reached override analysis"));
    let selectors = tree.children(selector_list);
    let declarations = tree.children(declaration_block);
    assert!(
        selectors.len() == 1,
        "override analysis requires split rulesets; found {} selectors",
        selectors.len()
    );
    assert!(
        declarations.len() == 1,
        "override analysis requires split rulesets; found {} declarations",
        declarations.len()
    );
    (selectors[0], declarations[0])
}
