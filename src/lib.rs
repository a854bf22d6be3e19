//! Tree-rewriting optimization core for an extended stylesheet compiler.
//!
//! The parser (external) builds a [`ast::CssTree`]; a sequence of passes
//! analyzes and rewrites the shared tree in place through the mutating
//! visit protocol; printers (external) walk the finished tree. This crate
//! supplies the traversal/mutation substrate, visitor composition, the
//! cascade-analysis passes (override elimination, adjacent merging,
//! positional abbreviation), and the pass pipeline that orders them.

pub mod ast;
pub mod diagnostics;
pub mod logging;
pub mod passes;
pub mod property;
pub mod render;
pub mod visit;
