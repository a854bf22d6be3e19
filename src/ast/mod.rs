pub mod node;
pub mod tree;

pub use node::{
    Combinator, Comment, NodeBase, NodeKind, Refiner, RefinerKind, Span, ALTERNATE_ANNOTATION,
};
pub use tree::{CssTree, Node, NodeId};
