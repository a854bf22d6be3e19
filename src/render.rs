//! Canonical text rendering.
//!
//! Override and merge analysis compare nodes by canonical rendered text, not
//! by identity or raw structure. This module is the single place that
//! produces those comparable keys, plus a compact whole-stylesheet renderer
//! used by tests. Concrete pretty/template/source-mapped printers live
//! outside the core and walk the tree through the same visitor protocol.

use crate::ast::{CssTree, NodeId, NodeKind};

/// Canonical text of a single value node.
pub fn value_text(tree: &CssTree, id: NodeId) -> String {
    match tree.kind(id) {
        NodeKind::Numeric { magnitude, unit } => format!("{magnitude}{unit}"),
        NodeKind::Literal { text } => text.clone(),
        NodeKind::Str { text } => format!("\"{text}\""),
        NodeKind::HexColor { text } => format!("#{}", text.to_ascii_lowercase()),
        NodeKind::FunctionCall { name } => {
            let args: Vec<String> = tree
                .children(id)
                .iter()
                .map(|&arg| value_text(tree, arg))
                .collect();
            format!("{name}({})", args.join(","))
        }
        NodeKind::Composite { operator } => {
            let operands: Vec<String> = tree
                .children(id)
                .iter()
                .map(|&op| value_text(tree, op))
                .collect();
            operands.join(operator)
        }
        NodeKind::Priority => "!important".to_string(),
        NodeKind::ConstantReference { name } => name.clone(),
        other => panic!("value_text on non-value node kind `{}`", other.name()),
    }
}

/// Canonical text of a selector, including its refiner chain and any
/// chained selectors reached through its combinator.
pub fn selector_text(tree: &CssTree, id: NodeId) -> String {
    let NodeKind::Selector {
        name,
        refiners,
        combinator,
    } = tree.kind(id)
    else {
        panic!(
            "selector_text on non-selector node kind `{}`",
            tree.kind(id).name()
        );
    };
    let mut out = name.clone();
    for refiner in refiners {
        out.push_str(&refiner.to_string());
    }
    if let Some(combinator) = combinator {
        if let Some(&chained) = tree.children(id).first() {
            out.push_str(combinator.as_str());
            out.push_str(&selector_text(tree, chained));
        }
    }
    out
}

/// Canonical text of a selector list (`.a,.b`).
pub fn selector_list_text(tree: &CssTree, id: NodeId) -> String {
    let selectors: Vec<String> = tree
        .children(id)
        .iter()
        .map(|&s| selector_text(tree, s))
        .collect();
    selectors.join(",")
}

/// The override-table property key: the canonical property name, prefixed
/// with `*` when the declaration carries the legacy star hack. The prefix
/// keeps hacked and unhacked declarations from shadowing each other.
pub fn property_key(canonical_name: &str, star_hack: bool) -> String {
    if star_hack {
        format!("*{canonical_name}")
    } else {
        canonical_name.to_string()
    }
}

/// Canonical text of a declaration (`*margin-top:1px 2px !important`).
pub fn declaration_text(tree: &CssTree, id: NodeId) -> String {
    let NodeKind::Declaration {
        property, star_hack, ..
    } = tree.kind(id)
    else {
        panic!(
            "declaration_text on non-declaration node kind `{}`",
            tree.kind(id).name()
        );
    };
    let values: Vec<String> = tree
        .children(id)
        .iter()
        .map(|&v| value_text(tree, v))
        .collect();
    let star = if *star_hack { "*" } else { "" };
    format!("{star}{property}:{}", values.join(" "))
}

/// Canonical text of a declaration block (`color:red;margin:0`). This is
/// the equality key the adjacent-merge engine compares.
pub fn declaration_block_text(tree: &CssTree, id: NodeId) -> String {
    let declarations: Vec<String> = tree
        .children(id)
        .iter()
        .map(|&d| declaration_text(tree, d))
        .collect();
    declarations.join(";")
}

/// Compact rendering of a ruleset.
pub fn ruleset_text(tree: &CssTree, id: NodeId) -> String {
    let selectors = tree
        .selector_list_of(id)
        .map(|sl| selector_list_text(tree, sl))
        .unwrap_or_default();
    let body = tree
        .declaration_block_of(id)
        .map(|db| declaration_block_text(tree, db))
        .unwrap_or_default();
    format!("{selectors}{{{body}}}")
}

/// Compact rendering of the whole tree, for tests and debugging output.
pub fn stylesheet_text(tree: &CssTree) -> String {
    block_text(tree, tree.body())
}

fn block_text(tree: &CssTree, block: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(block) {
        match tree.kind(child) {
            NodeKind::Ruleset => out.push_str(&ruleset_text(tree, child)),
            NodeKind::Block => {
                out.push('{');
                out.push_str(&block_text(tree, child));
                out.push('}');
            }
            _ => out.push_str(&value_text(tree, child)),
        }
    }
    out
}
