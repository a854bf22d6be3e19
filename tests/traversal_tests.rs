//! Mutation-safety of the visit controller: every edit shape must leave the
//! live cursor consistent, with each subsequent sibling visited exactly once
//! and revisited replacements visited exactly once.

mod common;

use common::*;
use stylec::ast::{CssTree, NodeBase, NodeId, NodeKind, Refiner};
use stylec::render;
use stylec::visit::{CssVisitor, MutatingVisitController, VisitCx};

/// Build a detached `.class{color:red}` ruleset from inside a visitor.
fn build_rule(cx: &mut VisitCx<'_>, class: &str) -> NodeId {
    let value = cx.alloc(
        NodeKind::Literal {
            text: "red".to_string(),
        },
        NodeBase::new(),
    );
    let declaration = cx.alloc(
        NodeKind::Declaration {
            property: "color".to_string(),
            important: false,
            star_hack: false,
            custom: false,
        },
        NodeBase::new(),
    );
    cx.append_child(declaration, value);
    let declaration_block = cx.alloc(NodeKind::DeclarationBlock, NodeBase::new());
    cx.append_child(declaration_block, declaration);
    let selector = cx.alloc(
        NodeKind::Selector {
            name: String::new(),
            refiners: vec![Refiner::class(class)],
            combinator: None,
        },
        NodeBase::new(),
    );
    let selector_list = cx.alloc(NodeKind::SelectorList, NodeBase::new());
    cx.append_child(selector_list, selector);
    let ruleset = cx.alloc(NodeKind::Ruleset, NodeBase::new());
    cx.append_child(ruleset, selector_list);
    cx.append_child(ruleset, declaration_block);
    ruleset
}

fn selector_of(tree: &CssTree, ruleset: NodeId) -> String {
    let list = tree.selector_list_of(ruleset).expect("selector list");
    render::selector_list_text(tree, list)
}

/// Replaces the `.target` ruleset with freshly built rulesets (possibly
/// none), recording every ruleset entered along the way.
struct ReplacingVisitor {
    target: &'static str,
    replacements: &'static [&'static str],
    revisit: bool,
    fired: bool,
    visited: Vec<String>,
}

impl ReplacingVisitor {
    fn new(target: &'static str, replacements: &'static [&'static str], revisit: bool) -> Self {
        ReplacingVisitor {
            target,
            replacements,
            revisit,
            fired: false,
            visited: Vec::new(),
        }
    }
}

impl CssVisitor for ReplacingVisitor {
    fn enter_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let selector = selector_of(cx.tree(), id);
        self.visited.push(selector.clone());
        if !self.fired && selector == self.target {
            self.fired = true;
            let new_nodes: Vec<NodeId> = self
                .replacements
                .iter()
                .map(|class| build_rule(cx, class))
                .collect();
            cx.replace_current(new_nodes, self.revisit);
        }
        true
    }
}

fn three_rule_tree() -> CssTree {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_rule(&mut tree, "b", "color", "red");
    append_rule(&mut tree, "c", "color", "red");
    tree
}

fn body_selectors(tree: &CssTree) -> Vec<String> {
    tree.children(tree.body())
        .iter()
        .map(|&rs| selector_of(tree, rs))
        .collect()
}

#[test]
fn replace_with_many_and_revisit_visits_each_new_node_once() {
    let mut tree = three_rule_tree();
    let mut visitor = ReplacingVisitor::new(".b", &["x", "y"], true);
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".x", ".y", ".c"]);
    assert_eq!(body_selectors(&tree), [".a", ".x", ".y", ".c"]);
}

#[test]
fn replace_with_many_without_revisit_skips_the_new_nodes() {
    let mut tree = three_rule_tree();
    let mut visitor = ReplacingVisitor::new(".b", &["x", "y"], false);
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".c"]);
    assert_eq!(body_selectors(&tree), [".a", ".x", ".y", ".c"]);
}

#[test]
fn replace_with_one_keeps_siblings_single_visited() {
    let mut tree = three_rule_tree();
    let mut visitor = ReplacingVisitor::new(".b", &["x"], true);
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".x", ".c"]);
    assert_eq!(body_selectors(&tree), [".a", ".x", ".c"]);
}

#[test]
fn replace_with_zero_behaves_like_removal() {
    let mut tree = three_rule_tree();
    let mut visitor = ReplacingVisitor::new(".b", &[], true);
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".c"]);
    assert_eq!(body_selectors(&tree), [".a", ".c"]);
}

struct RemovingVisitor {
    target: &'static str,
    visited: Vec<String>,
}

impl CssVisitor for RemovingVisitor {
    fn enter_ruleset(&mut self, cx: &mut VisitCx<'_>, id: NodeId) -> bool {
        let selector = selector_of(cx.tree(), id);
        self.visited.push(selector.clone());
        if selector == self.target {
            cx.remove_current();
        }
        true
    }
}

#[test]
fn remove_current_resumes_at_the_next_sibling() {
    let mut tree = three_rule_tree();
    let mut visitor = RemovingVisitor {
        target: ".b",
        visited: Vec::new(),
    };
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".c"]);
    assert_eq!(body_selectors(&tree), [".a", ".c"]);
}

#[test]
fn removed_node_is_orphaned_immediately() {
    let mut tree = three_rule_tree();
    let removed = tree.children(tree.body())[1];
    let mut visitor = RemovingVisitor {
        target: ".b",
        visited: Vec::new(),
    };
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(tree.parent(removed), None);
    assert!(!tree.is_attached(removed));
}

#[test]
fn growing_the_iterated_sequence_terminates() {
    // Replacing one node with two (no revisit) grows the sequence being
    // iterated; the cursor must land after the inserted span and finish.
    let mut tree = three_rule_tree();
    let mut visitor = ReplacingVisitor::new(".a", &["a1", "a2", "a3"], false);
    MutatingVisitController::start_visit(&mut tree, &mut visitor);

    assert_eq!(visitor.visited, [".a", ".b", ".c"]);
    assert_eq!(body_selectors(&tree), [".a1", ".a2", ".a3", ".b", ".c"]);
}
