pub mod composite;
pub mod controller;
pub mod visitor;

pub use composite::{
    DelegatingVisitor, PermissivePolicy, RewritePolicy, SkippingVisitor, UnsafePropertyPolicy,
};
pub use controller::{MutatingVisitController, VisitCx};
pub use visitor::CssVisitor;
