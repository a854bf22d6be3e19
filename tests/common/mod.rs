//! Shared tree-construction helpers for the integration tests.
//!
//! All trees are built post-split: one selector and one declaration per
//! ruleset, the shape the analysis passes require.

#![allow(dead_code)]

use stylec::ast::{Comment, CssTree, NodeId, Refiner};
use stylec::diagnostics::ErrorManager;
use stylec::passes::{Pass, PassContext, RemovalSet};
use stylec::property::DefaultPropertyRegistry;
use stylec::render;

/// `.class { property: value }` appended to the tree body.
pub fn append_rule(tree: &mut CssTree, class: &str, property: &str, value: &str) -> NodeId {
    append_rule_full(tree, class, property, value, false, false)
}

/// `.class { property: value !important }` appended to the tree body.
pub fn append_important_rule(
    tree: &mut CssTree,
    class: &str,
    property: &str,
    value: &str,
) -> NodeId {
    append_rule_full(tree, class, property, value, true, false)
}

pub fn append_rule_full(
    tree: &mut CssTree,
    class: &str,
    property: &str,
    value: &str,
    important: bool,
    star_hack: bool,
) -> NodeId {
    let value = tree.literal(value);
    let declaration = tree.declaration(property, vec![value], important, star_hack);
    let selector = tree.selector("", vec![Refiner::class(class)], None);
    let ruleset = tree.ruleset(vec![selector], vec![declaration]);
    let body = tree.body();
    tree.append_child(body, ruleset);
    ruleset
}

/// Like [`append_rule`], with the declaration annotated `@alternate`.
pub fn append_alternate_rule(
    tree: &mut CssTree,
    class: &str,
    property: &str,
    value: &str,
) -> NodeId {
    let ruleset = append_rule(tree, class, property, value);
    let declaration = declaration_of(tree, ruleset);
    tree.node_mut(declaration)
        .base
        .comments
        .push(Comment::new("@alternate"));
    ruleset
}

/// An opaque non-ruleset child (a nested block), acting as a barrier.
pub fn append_barrier(tree: &mut CssTree) -> NodeId {
    let block = tree.block(vec![]);
    let body = tree.body();
    tree.append_child(body, block);
    block
}

/// The single declaration of a post-split ruleset.
pub fn declaration_of(tree: &CssTree, ruleset: NodeId) -> NodeId {
    let block = tree.declaration_block_of(ruleset).expect("declaration block");
    tree.children(block)[0]
}

/// Run one pass against the default registry; returns the removal set.
pub fn run_pass(tree: &mut CssTree, pass: &mut dyn Pass) -> RemovalSet {
    let mut removal = RemovalSet::new();
    run_pass_with(tree, pass, &mut removal);
    removal
}

/// Run one pass accumulating into an existing removal set.
pub fn run_pass_with(tree: &mut CssTree, pass: &mut dyn Pass, removal: &mut RemovalSet) {
    let registry = DefaultPropertyRegistry;
    let mut errors = ErrorManager::new();
    let mut ctx = PassContext {
        registry: &registry,
        errors: &mut errors,
        removal,
    };
    pass.run(tree, &mut ctx);
    assert!(
        !errors.has_errors(),
        "unexpected diagnostics: {}",
        errors.generate_report()
    );
}

/// Selector texts of the marked rulesets, sorted for stable assertions.
pub fn marked_selectors(tree: &CssTree, removal: &RemovalSet) -> Vec<String> {
    let mut selectors: Vec<String> = removal
        .iter()
        .map(|ruleset| {
            let list = tree.selector_list_of(ruleset).expect("selector list");
            render::selector_list_text(tree, list)
        })
        .collect();
    selectors.sort();
    selectors
}
