//! Adjacent-merge and barrier behavior.

mod common;

use common::*;
use stylec::ast::{CssTree, Refiner};
use stylec::passes::{CompactRemovedRulesets, MergeAdjacentRulesets, RemovalSet};
use stylec::render;
use stylec::visit::UnsafePropertyPolicy;

fn append_pseudo_element_rule(
    tree: &mut CssTree,
    class: &str,
    pseudo: &str,
    property: &str,
    value: &str,
) -> stylec::ast::NodeId {
    let value = tree.literal(value);
    let declaration = tree.declaration(property, vec![value], false, false);
    let selector = tree.selector(
        "",
        vec![Refiner::class(class), Refiner::pseudo_element(pseudo)],
        None,
    );
    let ruleset = tree.ruleset(vec![selector], vec![declaration]);
    let body = tree.body();
    tree.append_child(body, ruleset);
    ruleset
}

#[test]
fn identical_adjacent_rulesets_merge() {
    let mut tree = CssTree::new();
    let first = append_rule(&mut tree, "a", "color", "red");
    let second = append_rule(&mut tree, "b", "color", "red");

    let mut removal = RemovalSet::new();
    run_pass_with(&mut tree, &mut MergeAdjacentRulesets::new(), &mut removal);

    assert!(removal.contains(second));
    assert!(!removal.contains(first));
    let list = tree.selector_list_of(first).unwrap();
    assert_eq!(render::selector_list_text(&tree, list), ".a,.b");

    run_pass_with(&mut tree, &mut CompactRemovedRulesets::new(), &mut removal);
    assert_eq!(render::stylesheet_text(&tree), ".a,.b{color:red}");
}

#[test]
fn run_of_identical_rulesets_folds_into_the_first() {
    let mut tree = CssTree::new();
    let first = append_rule(&mut tree, "a", "color", "red");
    append_rule(&mut tree, "b", "color", "red");
    append_rule(&mut tree, "c", "color", "red");

    let mut removal = RemovalSet::new();
    run_pass_with(&mut tree, &mut MergeAdjacentRulesets::new(), &mut removal);

    assert_eq!(removal.len(), 2);
    let list = tree.selector_list_of(first).unwrap();
    assert_eq!(render::selector_list_text(&tree, list), ".a,.b,.c");
}

#[test]
fn different_declarations_do_not_merge() {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_rule(&mut tree, "b", "color", "blue");

    let removal = run_pass(&mut tree, &mut MergeAdjacentRulesets::new());
    assert!(removal.is_empty());
}

#[test]
fn important_and_plain_declarations_do_not_merge() {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_important_rule(&mut tree, "b", "color", "red");

    let removal = run_pass(&mut tree, &mut MergeAdjacentRulesets::new());
    assert!(removal.is_empty());
}

#[test]
fn non_ruleset_child_resets_the_candidate() {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_barrier(&mut tree);
    append_rule(&mut tree, "b", "color", "red");

    let removal = run_pass(&mut tree, &mut MergeAdjacentRulesets::new());
    assert!(removal.is_empty());
}

#[test]
fn unknown_pseudo_element_is_a_barrier() {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_pseudo_element_rule(&mut tree, "x", "part", "color", "red");
    append_rule(&mut tree, "b", "color", "red");

    let removal = run_pass(&mut tree, &mut MergeAdjacentRulesets::new());

    // `::part` is unrecognized: it neither merges nor lets the rulesets
    // around it merge with each other.
    assert!(removal.is_empty());
}

#[test]
fn recognized_pseudo_element_merges_normally() {
    let mut tree = CssTree::new();
    let first = append_pseudo_element_rule(&mut tree, "a", "before", "color", "red");
    let second = append_pseudo_element_rule(&mut tree, "b", "before", "color", "red");

    let mut removal = RemovalSet::new();
    run_pass_with(&mut tree, &mut MergeAdjacentRulesets::new(), &mut removal);

    assert!(removal.contains(second));
    let list = tree.selector_list_of(first).unwrap();
    assert_eq!(render::selector_list_text(&tree, list), ".a::before,.b::before");
}

#[test]
fn policy_refusal_is_a_barrier() {
    let mut tree = CssTree::new();
    append_rule(&mut tree, "a", "color", "red");
    append_rule(&mut tree, "guarded", "float", "left");
    append_rule(&mut tree, "b", "color", "red");

    let policy = UnsafePropertyPolicy::new(["float"]);
    let mut pass = MergeAdjacentRulesets::with_policy(Box::new(policy));
    let removal = run_pass(&mut tree, &mut pass);

    assert!(removal.is_empty());
}

#[test]
fn merge_only_inspects_direct_children_of_each_block() {
    let mut tree = CssTree::new();
    let outer = append_rule(&mut tree, "a", "color", "red");
    let barrier = append_barrier(&mut tree);
    // An identical ruleset inside the nested block must not merge with the
    // outer one, but two identical rulesets inside it merge together.
    let v1 = tree.literal("red");
    let d1 = tree.declaration("color", vec![v1], false, false);
    let s1 = tree.selector("", vec![Refiner::class("inner1")], None);
    let inner1 = tree.ruleset(vec![s1], vec![d1]);
    let v2 = tree.literal("red");
    let d2 = tree.declaration("color", vec![v2], false, false);
    let s2 = tree.selector("", vec![Refiner::class("inner2")], None);
    let inner2 = tree.ruleset(vec![s2], vec![d2]);
    tree.append_child(barrier, inner1);
    tree.append_child(barrier, inner2);

    let mut removal = RemovalSet::new();
    run_pass_with(&mut tree, &mut MergeAdjacentRulesets::new(), &mut removal);

    assert!(!removal.contains(outer));
    assert!(!removal.contains(inner1));
    assert!(removal.contains(inner2));
    let list = tree.selector_list_of(inner1).unwrap();
    assert_eq!(render::selector_list_text(&tree, list), ".inner1,.inner2");
}
