use std::fmt;

/// Source span of a node in the original stylesheet text, byte-offset based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A comment annotation attached to a node by the parser.
///
/// Annotation comments (e.g. `/* @alternate */`) carry processing hints that
/// survive into the tree; ordinary comments are carried for printers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }

    /// Whether this comment carries the given `@name` annotation.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.text
            .split_whitespace()
            .any(|word| word.strip_prefix('@') == Some(name))
    }
}

/// Shared per-node metadata: source span, attached comments, and the opaque
/// chunk partition label. The chunk label is carried for printers and never
/// interpreted here.
#[derive(Debug, Clone, Default)]
pub struct NodeBase {
    pub span: Option<Span>,
    pub comments: Vec<Comment>,
    pub chunk: Option<String>,
}

impl NodeBase {
    pub fn new() -> Self {
        NodeBase::default()
    }

    pub fn with_span(span: Span) -> Self {
        NodeBase {
            span: Some(span),
            ..NodeBase::default()
        }
    }

    /// Whether any attached comment carries the given `@name` annotation.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.comments.iter().any(|c| c.has_annotation(name))
    }
}

/// Combinator linking a selector to the chained selector that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace combinator (e.g. `div p`).
    Descendant,
    /// `>` combinator.
    Child,
    /// `+` combinator.
    AdjacentSibling,
    /// `~` combinator.
    GeneralSibling,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }
    }
}

/// The kind of a selector refiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefinerKind {
    /// `.name`
    Class,
    /// `#name`
    Id,
    /// `:name`
    PseudoClass,
    /// `::name`
    PseudoElement,
    /// `[name]` (condition text kept verbatim in `name`)
    Attribute,
}

/// One refiner in a selector's refiner chain (e.g. `.warning`, `::before`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Refiner {
    pub kind: RefinerKind,
    pub name: String,
}

impl Refiner {
    pub fn new(kind: RefinerKind, name: impl Into<String>) -> Self {
        Refiner {
            kind,
            name: name.into(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Refiner::new(RefinerKind::Class, name)
    }

    pub fn id(name: impl Into<String>) -> Self {
        Refiner::new(RefinerKind::Id, name)
    }

    pub fn pseudo_class(name: impl Into<String>) -> Self {
        Refiner::new(RefinerKind::PseudoClass, name)
    }

    pub fn pseudo_element(name: impl Into<String>) -> Self {
        Refiner::new(RefinerKind::PseudoElement, name)
    }
}

impl fmt::Display for Refiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RefinerKind::Class => write!(f, ".{}", self.name),
            RefinerKind::Id => write!(f, "#{}", self.name),
            RefinerKind::PseudoClass => write!(f, ":{}", self.name),
            RefinerKind::PseudoElement => write!(f, "::{}", self.name),
            RefinerKind::Attribute => write!(f, "[{}]", self.name),
        }
    }
}

/// Represents every construct the optimization core operates on.
/// Child structure lives in the tree (`CssTree`), not in the variants:
/// a variant holds only the data owned by the node itself.
///
/// # Child conventions
/// - `Root`: one `Block`.
/// - `Block`: `Ruleset`s interleaved with opaque non-ruleset nodes.
/// - `Ruleset`: a `SelectorList` followed by a `DeclarationBlock`.
/// - `SelectorList`: `Selector`s.
/// - `Selector`: at most one chained `Selector` (reached via `combinator`).
/// - `DeclarationBlock`: `Declaration`s.
/// - `Declaration`: value nodes, with `Priority` last when `important`.
/// - `FunctionCall`: argument value nodes; `Composite`: operand value nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The single tree root.
    Root,
    /// A brace-delimited body of rulesets and nested constructs.
    Block,
    /// Selector(s) plus a declaration block.
    Ruleset,
    /// The comma-separated selectors of a ruleset.
    SelectorList,
    /// One selector: element name, refiner chain, and the combinator
    /// linking to a chained child selector (if any).
    Selector {
        name: String,
        refiners: Vec<Refiner>,
        combinator: Option<Combinator>,
    },
    /// The `{ ... }` body of a ruleset.
    DeclarationBlock,
    /// One property/value(s) pair.
    Declaration {
        property: String,
        important: bool,
        star_hack: bool,
        custom: bool,
    },
    /// A numeric value; the magnitude is kept as source text so `1.0` and
    /// `1` stay distinct.
    Numeric { magnitude: String, unit: String },
    /// A bare identifier value (e.g. `solid`, `auto`).
    Literal { text: String },
    /// A quoted string value.
    Str { text: String },
    /// A hex color value, stored without the leading `#`.
    HexColor { text: String },
    /// A function invocation value (e.g. `url(...)`, `rgb(...)`); the
    /// arguments are child nodes.
    FunctionCall { name: String },
    /// An operator-joined value (e.g. `a / b`); the operands are child nodes.
    Composite { operator: String },
    /// Marks the declaration as `!important`.
    Priority,
    /// A reference to a named constant, left for the substitution passes.
    ConstantReference { name: String },
}

impl NodeKind {
    /// Short lowercase name of the kind, used in traces and panics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Block => "block",
            NodeKind::Ruleset => "ruleset",
            NodeKind::SelectorList => "selector-list",
            NodeKind::Selector { .. } => "selector",
            NodeKind::DeclarationBlock => "declaration-block",
            NodeKind::Declaration { .. } => "declaration",
            NodeKind::Numeric { .. } => "numeric",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Str { .. } => "string",
            NodeKind::HexColor { .. } => "hex-color",
            NodeKind::FunctionCall { .. } => "function-call",
            NodeKind::Composite { .. } => "composite",
            NodeKind::Priority => "priority",
            NodeKind::ConstantReference { .. } => "constant-reference",
        }
    }

    /// Whether this kind is one of the value variants.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            NodeKind::Numeric { .. }
                | NodeKind::Literal { .. }
                | NodeKind::Str { .. }
                | NodeKind::HexColor { .. }
                | NodeKind::FunctionCall { .. }
                | NodeKind::Composite { .. }
                | NodeKind::Priority
                | NodeKind::ConstantReference { .. }
        )
    }
}

/// The annotation name that marks a declaration as an alternate
/// (a fallback that never shadows earlier declarations).
pub const ALTERNATE_ANNOTATION: &str = "alternate";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_lookup() {
        let base = NodeBase {
            comments: vec![Comment::new("@alternate")],
            ..NodeBase::default()
        };
        assert!(base.has_annotation("alternate"));
        assert!(!base.has_annotation("noflip"));
    }

    #[test]
    fn annotation_requires_at_sign() {
        let base = NodeBase {
            comments: vec![Comment::new("alternate path through the code")],
            ..NodeBase::default()
        };
        assert!(!base.has_annotation("alternate"));
    }

    #[test]
    fn refiner_display() {
        assert_eq!(Refiner::class("warn").to_string(), ".warn");
        assert_eq!(Refiner::id("main").to_string(), "#main");
        assert_eq!(Refiner::pseudo_element("before").to_string(), "::before");
    }
}
